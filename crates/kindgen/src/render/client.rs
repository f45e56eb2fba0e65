//! Typed REST client with one accessor per registry.

use proc_macro2::TokenStream;
use quote::quote;

use super::{Context, Template};
use crate::{
	error::RenderError,
	model::{CodeTemplate, RegistryDescriptor},
	util::{pluralize, to_lower_snake_case},
};

pub struct ClientTemplate;

impl Template for ClientTemplate {
	fn name(&self) -> &'static str {
		"client"
	}

	fn expand(&self, model: &CodeTemplate, cx: &Context) -> Result<TokenStream, RenderError> {
		let rt = &cx.runtime;
		cx.ensure_unique_kinds(model)?;
		let (accessors, resources): (Vec<_>, Vec<_>) = model
			.registries()
			.iter()
			.map(|registry| resource_client(registry, cx))
			.collect::<Result<Vec<_>, _>>()?
			.into_iter()
			.unzip();
		let doc = format!(" Typed client for the kinds of package `{}`.", model.package_name());

		Ok(quote! {
			#[doc = #doc]
			pub struct Client<T> {
				rest: #rt::rest::RestClient<T>,
			}

			impl<T: #rt::rest::Transport> Client<T> {
				pub fn new(transport: T, config: #rt::rest::ClientConfig) -> Self {
					Self {
						rest: #rt::rest::RestClient::new(transport, config),
					}
				}

				pub fn rest(&self) -> &#rt::rest::RestClient<T> {
					&self.rest
				}

				#(#accessors)*
			}

			#(#resources)*
		})
	}
}

/// Accessor on `Client` and the per-kind client it returns.
fn resource_client(
	registry: &RegistryDescriptor,
	cx: &Context,
) -> Result<(TokenStream, TokenStream), RenderError> {
	let rt = &cx.runtime;
	let types = &cx.types;

	let plural = pluralize(&registry.name);
	let object = cx.ident(&registry.name)?;
	let client = cx.ident(&format!("{plural}Client"))?;
	let accessor = cx.ident(&to_lower_snake_case(&plural))?;
	let resource = plural.to_ascii_lowercase();

	let accessor = if registry.namespaced {
		let doc = format!(" `{}` objects in `namespace`.", registry.name);
		quote! {
			#[doc = #doc]
			pub fn #accessor(&self, namespace: &str) -> #client<'_, T> {
				#client {
					rest: &self.rest,
					namespace: ::core::option::Option::Some(::std::borrow::ToOwned::to_owned(namespace)),
				}
			}
		}
	} else {
		let doc = format!(" Cluster-scoped `{}` objects.", registry.name);
		quote! {
			#[doc = #doc]
			pub fn #accessor(&self) -> #client<'_, T> {
				#client {
					rest: &self.rest,
					namespace: ::core::option::Option::None,
				}
			}
		}
	};

	let result = quote!(::core::result::Result);
	let error = quote!(#rt::rest::ClientError);
	let method = quote!(#rt::rest::Method);
	let resource_client = quote! {
		pub struct #client<'a, T> {
			rest: &'a #rt::rest::RestClient<T>,
			namespace: ::core::option::Option<::std::string::String>,
		}

		impl<'a, T: #rt::rest::Transport> #client<'a, T> {
			pub const RESOURCE: &'static str = #resource;

			pub fn namespace(&self) -> ::core::option::Option<&str> {
				self.namespace.as_deref()
			}

			pub fn get(&self, name: &str) -> #result<#types::#object, #error> {
				self.rest
					.request(#method::Get, self.namespace(), Self::RESOURCE, ::core::option::Option::Some(name))
					.send()
			}

			pub fn create(&self, object: &#types::#object) -> #result<#types::#object, #error> {
				self.rest
					.request(#method::Post, self.namespace(), Self::RESOURCE, ::core::option::Option::None)
					.json(object)?
					.send()
			}

			pub fn list(&self, options: &#rt::rest::ListOptions) -> #result<::std::vec::Vec<#types::#object>, #error> {
				self.rest
					.request(#method::Get, self.namespace(), Self::RESOURCE, ::core::option::Option::None)
					.list_options(options)
					.send()
			}

			pub fn update(&self, name: &str, object: &#types::#object) -> #result<#types::#object, #error> {
				self.rest
					.request(#method::Put, self.namespace(), Self::RESOURCE, ::core::option::Option::Some(name))
					.json(object)?
					.send()
			}

			pub fn delete(&self, name: &str) -> #result<(), #error> {
				self.rest
					.request(#method::Delete, self.namespace(), Self::RESOURCE, ::core::option::Option::Some(name))
					.send_empty()
			}
		}
	};

	Ok((accessor, resource_client))
}
