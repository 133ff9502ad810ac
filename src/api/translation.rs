//! Machine translation of listing text.

// self
use crate::{
	_prelude::*,
	api::require_text,
	error::ValidationError,
	http::ApiHttpClient,
	oauth::TransportErrorMapper,
};

facade! {
	/// Listing text translation.
	TranslationApi, translation, "/commerce/translation/v1_beta"
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateRequest<'a> {
	from: &'a str,
	to: &'a str,
	translation_context: &'a str,
	text: &'a [&'a str],
}

impl<C, M> TranslationApi<'_, C, M>
where
	C: ?Sized + ApiHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `POST /translate`
	///
	/// `from` and `to` are language codes such as `en` or `de`; `translation_context` is e.g.
	/// `ITEM_TITLE`. At least one text entry is required.
	pub async fn translate(
		&self,
		from: &str,
		to: &str,
		translation_context: &str,
		text: &[&str],
	) -> Result<JsonValue> {
		let from = require_text("from", from)?;
		let to = require_text("to", to)?;
		let translation_context = require_text("translationContext", translation_context)?;

		if text.is_empty() {
			return Err(ValidationError::Required { field: "text" }.into());
		}

		let request = TranslateRequest { from, to, translation_context, text };

		self.client.post(&self.path("/translate"), &request).await
	}
}
