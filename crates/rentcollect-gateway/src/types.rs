use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct SendTextRequest<'a> {
    pub number: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMediaRequest<'a> {
    pub number: &'a str,
    pub mediatype: &'static str,
    /// Base64-encoded file contents.
    pub media: String,
    pub caption: &'a str,
}
