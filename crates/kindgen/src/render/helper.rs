use proc_macro2::TokenStream;
use quote::quote;

use super::{Context, Template};
use crate::{error::RenderError, model::CodeTemplate, util::pluralize};

/// Kind descriptors for the registries and API objects of a package, plus a
/// lookup table for the runtime object registry.
pub struct HelperTemplate;

impl Template for HelperTemplate {
	fn name(&self) -> &'static str {
		"helper"
	}

	fn expand(&self, model: &CodeTemplate, cx: &Context) -> Result<TokenStream, RenderError> {
		let rt = &cx.runtime;
		cx.ensure_unique_kinds(model)?;

		let mut registries = Vec::with_capacity(model.registries().len());
		let mut kind_impls = Vec::with_capacity(model.registries().len());
		for registry in model.registries() {
			let ty = cx.ident(&registry.registry_type_name)?;
			// the kind name becomes a type name in the client
			cx.ident(&registry.name)?;
			let name = &registry.name;
			let resource = pluralize(name).to_ascii_lowercase();
			let namespaced = registry.namespaced;
			kind_impls.push(quote! {
				impl #rt::registry::Kind for #ty {
					const INFO: #rt::registry::KindInfo =
						#rt::registry::KindInfo::new(#name, #resource, #namespaced);
				}
			});
			registries.push(ty);
		}

		let objects = cx.api_object_idents(model)?;
		let kinds = model.api_object_names();

		Ok(quote! {
			#(#kind_impls)*

			#(
				impl #rt::ObjectKind for #objects {
					const KIND: &'static str = #kinds;
				}
			)*

			/// Kinds declared by the registries of this package, ordered by name.
			pub const KINDS: &[#rt::registry::KindInfo] = &[
				#(<#registries as #rt::registry::Kind>::INFO),*
			];

			/// Looks up a kind of this package by name.
			pub fn kind_info(name: &str) -> ::core::option::Option<#rt::registry::KindInfo> {
				KINDS.iter().find(|info| info.name == name).copied()
			}

			/// Adds every kind of this package to `registry`.
			pub fn register_kinds(registry: &mut #rt::registry::ObjectRegistry) {
				for info in KINDS {
					registry.register(*info);
				}
			}
		})
	}
}
