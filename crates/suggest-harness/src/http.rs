#![forbid(unsafe_code)]

//! Recording HTTP client. Requests stay in flight until the test completes them.

use suggest_widgets::{HttpClient, Method, RemoteRequest, RequestToken, Ticket};

/// A request the widget asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedRequest {
    pub ticket: Ticket,
    pub token: RequestToken,
    pub method: Method,
    pub endpoint: String,
    pub field_name: String,
    pub query: String,
    /// Full GET url with the encoded query.
    pub url: String,
}

#[derive(Debug, Default)]
pub struct FakeHttp {
    next_token: u64,
    issued: Vec<IssuedRequest>,
    canceled: Vec<RequestToken>,
}

impl FakeHttp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request issued so far, in order.
    #[must_use]
    pub fn issued(&self) -> &[IssuedRequest] {
        &self.issued
    }

    #[must_use]
    pub fn canceled(&self) -> &[RequestToken] {
        &self.canceled
    }

    #[must_use]
    pub fn is_canceled(&self, token: RequestToken) -> bool {
        self.canceled.contains(&token)
    }

    /// Issued and not canceled.
    pub fn in_flight(&self) -> impl Iterator<Item = &IssuedRequest> {
        self.issued
            .iter()
            .filter(|request| !self.canceled.contains(&request.token))
    }

    /// Most recent request for `query`.
    #[must_use]
    pub fn latest_for(&self, query: &str) -> Option<&IssuedRequest> {
        self.issued.iter().rev().find(|request| request.query == query)
    }

    /// Queries of every issued request, in order.
    #[must_use]
    pub fn queries(&self) -> Vec<&str> {
        self.issued.iter().map(|request| request.query.as_str()).collect()
    }
}

impl HttpClient for FakeHttp {
    fn issue(&mut self, request: &RemoteRequest<'_>) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.issued.push(IssuedRequest {
            ticket: request.ticket,
            token,
            method: request.method,
            endpoint: request.endpoint.to_owned(),
            field_name: request.field_name.to_owned(),
            query: request.query.to_owned(),
            url: request.url(),
        });
        token
    }

    fn cancel(&mut self, token: RequestToken) {
        self.canceled.push(token);
    }
}
