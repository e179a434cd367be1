//! Request construction: turns a target and a payload into a concrete
//! request description.
use crate::args::HttpMethod;
use crate::source::Target;

/// Ephemeral description of one attempt's request. Built fresh per attempt
/// and never shared across attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzRequest {
    pub final_url: String,
    pub method: HttpMethod,
    pub body: Option<String>,
}

/// Builds the request for one attempt.
///
/// GET appends the payload as a raw `?data=` query value without escaping
/// it here. The HTTP client re-parses the URL before sending, which can
/// alter what reaches the wire: reqwest's URL parser percent-encodes `'`
/// in query strings (it arrives as `%27`), and a URL it cannot parse at
/// all surfaces as an attempt-scoped transport failure. POST is exempt
/// from both since it sends the payload as the request body and leaves
/// the URL untouched.
#[must_use]
pub fn build(target: &Target, payload: &str) -> FuzzRequest {
    match target.method {
        HttpMethod::Get => FuzzRequest {
            final_url: format!("{}?data={}", target.url, payload),
            method: HttpMethod::Get,
            body: None,
        },
        HttpMethod::Post => FuzzRequest {
            final_url: target.url.clone(),
            method: HttpMethod::Post,
            body: Some(payload.to_owned()),
        },
    }
}
