//! Flat query-string parameters.

// self
use crate::_prelude::*;

/// Primitive value carried by a query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
	/// Sent verbatim (percent-encoded).
	Text(String),
	/// Sent in its canonical decimal form.
	Number(serde_json::Number),
}
impl Display for QueryValue {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			QueryValue::Text(text) => f.write_str(text),
			QueryValue::Number(number) => Display::fmt(number, f),
		}
	}
}
impl From<&str> for QueryValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}
impl From<String> for QueryValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}
impl From<&String> for QueryValue {
	fn from(value: &String) -> Self {
		Self::Text(value.clone())
	}
}
macro_rules! impl_number_query_value {
	($($ty:ty),+ $(,)?) => {
		$(
			impl From<$ty> for QueryValue {
				fn from(value: $ty) -> Self {
					Self::Number(serde_json::Number::from(value))
				}
			}
		)+
	};
}
impl_number_query_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Ordered map of unique query keys to primitive values.
///
/// Keys serialize in lexicographic order; an empty map produces no `?` at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, QueryValue>);
impl QueryParams {
	/// Creates an empty parameter map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds (or replaces) a parameter.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
		self.insert(key, value);

		self
	}

	/// Adds a parameter only when `value` is `Some`.
	pub fn with_opt<V>(self, key: impl Into<String>, value: Option<V>) -> Self
	where
		V: Into<QueryValue>,
	{
		match value {
			Some(value) => self.with(key, value),
			None => self,
		}
	}

	/// Inserts a parameter, returning the value it replaced.
	pub fn insert(
		&mut self,
		key: impl Into<String>,
		value: impl Into<QueryValue>,
	) -> Option<QueryValue> {
		self.0.insert(key.into(), value.into())
	}

	/// Looks up a parameter.
	pub fn get(&self, key: &str) -> Option<&QueryValue> {
		self.0.get(key)
	}

	/// Number of parameters.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no parameter is set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates over parameters in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
		self.0.iter().map(|(key, value)| (key.as_str(), value))
	}

	pub(crate) fn append_to(&self, url: &mut Url) {
		if self.is_empty() {
			return;
		}

		let mut pairs = url.query_pairs_mut();

		for (key, value) in self.iter() {
			pairs.append_pair(key, &value.to_string());
		}
	}
}
impl<K, V> FromIterator<(K, V)> for QueryParams
where
	K: Into<String>,
	V: Into<QueryValue>,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn optional_values_are_skipped_only_when_absent() {
		let params = QueryParams::new()
			.with_opt("limit", Some(0_u32))
			.with_opt::<u32>("offset", None)
			.with_opt("filter", Some("orderfulfillmentstatus:{NOT_STARTED}"));

		assert_eq!(params.len(), 2);
		assert_eq!(params.get("limit"), Some(&QueryValue::from(0_u32)));
		assert!(params.get("offset").is_none());
	}

	#[test]
	fn append_encodes_in_key_order() {
		let mut url = Url::parse("https://api.ebay.com/sell/inventory/v1/offer")
			.expect("Fixture URL should parse.");

		QueryParams::from_iter([("sku", "A B&C"), ("marketplace_id", "EBAY_US")])
			.append_to(&mut url);

		assert_eq!(url.query(), Some("marketplace_id=EBAY_US&sku=A+B%26C"));
	}

	#[test]
	fn empty_params_leave_url_untouched() {
		let mut url = Url::parse("https://api.ebay.com/commerce/identity/v1/user")
			.expect("Fixture URL should parse.");

		QueryParams::new().append_to(&mut url);

		assert_eq!(url.as_str(), "https://api.ebay.com/commerce/identity/v1/user");
	}
}
