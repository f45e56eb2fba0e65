//! Per-object metadata: deep copy, content hash and encoding.

use proc_macro2::TokenStream;
use quote::quote;

use super::{Context, Template};
use crate::{error::RenderError, model::CodeTemplate};

pub struct DeepCopyTemplate;

impl Template for DeepCopyTemplate {
	fn name(&self) -> &'static str {
		"deepcopy"
	}

	fn expand(&self, model: &CodeTemplate, cx: &Context) -> Result<TokenStream, RenderError> {
		let rt = &cx.runtime;
		let objects = cx.api_object_idents(model)?;
		Ok(quote! {
			#(
				impl #rt::DeepCopy for #objects {
					fn deep_copy(&self) -> Self {
						::core::clone::Clone::clone(self)
					}
				}
			)*
		})
	}
}

pub struct HashTemplate;

impl Template for HashTemplate {
	fn name(&self) -> &'static str {
		"hash"
	}

	fn expand(&self, model: &CodeTemplate, cx: &Context) -> Result<TokenStream, RenderError> {
		let rt = &cx.runtime;
		let objects = cx.api_object_idents(model)?;
		let kinds = model.api_object_names();
		Ok(quote! {
			#(
				impl #rt::ContentHash for #objects {
					fn content_hash(&self) -> ::core::result::Result<#rt::Fingerprint, #rt::EncodeError> {
						#rt::hash::fingerprint(#kinds, self)
					}
				}
			)*
		})
	}
}

pub struct EncodeTemplate;

impl Template for EncodeTemplate {
	fn name(&self) -> &'static str {
		"encode"
	}

	fn expand(&self, model: &CodeTemplate, cx: &Context) -> Result<TokenStream, RenderError> {
		let rt = &cx.runtime;
		let objects = cx.api_object_idents(model)?;
		Ok(quote! {
			#(
				impl #rt::Encode for #objects {
					fn encode(&self) -> ::core::result::Result<::std::vec::Vec<u8>, #rt::EncodeError> {
						#rt::encode::to_canonical_json(self)
					}

					fn decode(bytes: &[u8]) -> ::core::result::Result<Self, #rt::EncodeError> {
						#rt::encode::from_json(bytes)
					}
				}
			)*
		})
	}
}
