//! # GCE Instance Control Client
//!
//! The `ComputeService` trait is the seam between command handlers and the
//! compute API: the real `HttpComputeService` talks to the GCE v1 REST
//! endpoints, and tests drive the same code paths with a fake. Each method is
//! one blocking request with no retry; retry policy, if any, belongs to the
//! caller.
//!
//! Listing is the one multi-request operation. `list_instances` returns a
//! lazy iterator that fetches one page per underlying request and follows the
//! provider's `nextPageToken` cursor until it is absent, so unbounded
//! instance counts never get materialized eagerly.

use std::collections::VecDeque;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use crate::client::BLOCKING_CLIENT;
use crate::gcp::auth;
use crate::gcp::gce::error::GceError;
use crate::gcp::gce::types::{Instance, InstanceList, Operation};

const GCE_API_BASE: &str = "https://compute.googleapis.com/compute/v1";

/// The compute capability the facade needs: single-instance lookup, the two
/// asynchronous state-change requests, and one page of a listing.
pub trait ComputeService {
    /// Looks up one instance. Fails with a provider error if no instance
    /// with that name exists in the project/zone.
    fn get_instance(&self, project: &str, zone: &str, name: &str) -> Result<Instance, GceError>;

    /// Requests an asynchronous start. Returns the operation handle, not the
    /// final instance state.
    fn start_instance(&self, project: &str, zone: &str, name: &str)
    -> Result<Operation, GceError>;

    /// Requests an asynchronous stop. Symmetric to `start_instance`.
    fn stop_instance(&self, project: &str, zone: &str, name: &str) -> Result<Operation, GceError>;

    /// Fetches one page of the instance listing. `page_token` is `None` for
    /// the first page, then the `nextPageToken` of the previous page.
    fn list_page(
        &self,
        project: &str,
        zone: &str,
        page_token: Option<&str>,
    ) -> Result<InstanceList, GceError>;
}

/// `ComputeService` implementation over the GCE v1 REST API.
///
/// Holds the access token obtained at construction; the handle is read-only
/// afterwards and can be shared by every command invocation.
pub struct HttpComputeService {
    token: String,
}

impl HttpComputeService {
    /// Authenticates with the configured service account and returns a ready
    /// service handle.
    pub fn new() -> Result<Self> {
        let token = auth::get_access_token().context("Failed to get access token")?;
        Ok(HttpComputeService { token })
    }

    fn instance_url(&self, project: &str, zone: &str, name: &str) -> String {
        format!(
            "{}/projects/{}/zones/{}/instances/{}",
            GCE_API_BASE, project, zone, name
        )
    }

    /// Sends an authorized request and maps the response: non-2xx becomes a
    /// provider error carrying the JSON error body, a 2xx body that does not
    /// deserialize becomes a malformed-response error.
    fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::blocking::RequestBuilder,
    ) -> Result<T, GceError> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.token))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(GceError::provider(status, &body));
        }
        serde_json::from_str(&body).map_err(|e| GceError::MalformedResponse(e.to_string()))
    }
}

impl ComputeService for HttpComputeService {
    fn get_instance(&self, project: &str, zone: &str, name: &str) -> Result<Instance, GceError> {
        self.execute(BLOCKING_CLIENT.get(self.instance_url(project, zone, name)))
    }

    fn start_instance(
        &self,
        project: &str,
        zone: &str,
        name: &str,
    ) -> Result<Operation, GceError> {
        let url = format!("{}/start", self.instance_url(project, zone, name));
        self.execute(BLOCKING_CLIENT.post(url))
    }

    fn stop_instance(&self, project: &str, zone: &str, name: &str) -> Result<Operation, GceError> {
        let url = format!("{}/stop", self.instance_url(project, zone, name));
        self.execute(BLOCKING_CLIENT.post(url))
    }

    fn list_page(
        &self,
        project: &str,
        zone: &str,
        page_token: Option<&str>,
    ) -> Result<InstanceList, GceError> {
        let url = format!(
            "{}/projects/{}/zones/{}/instances",
            GCE_API_BASE, project, zone
        );
        let mut request = BLOCKING_CLIENT.get(url);
        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }
        self.execute(request)
    }
}

/// Returns a lazy iterator over every instance in the project/zone.
///
/// No request is issued until the iterator is first polled, and each provider
/// page costs exactly one `list_page` call. A page request failure yields the
/// error once and ends the iteration.
pub fn list_instances<'a>(
    service: &'a dyn ComputeService,
    project: &'a str,
    zone: &'a str,
) -> ListInstances<'a> {
    ListInstances {
        service,
        project,
        zone,
        buffered: VecDeque::new(),
        next_page_token: None,
        started: false,
        finished: false,
    }
}

/// Iterator state for [`list_instances`]. Yields instances in page order.
pub struct ListInstances<'a> {
    service: &'a dyn ComputeService,
    project: &'a str,
    zone: &'a str,
    buffered: VecDeque<Instance>,
    next_page_token: Option<String>,
    started: bool,
    finished: bool,
}

impl Iterator for ListInstances<'_> {
    type Item = Result<Instance, GceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(instance) = self.buffered.pop_front() {
                return Some(Ok(instance));
            }
            if self.finished || (self.started && self.next_page_token.is_none()) {
                self.finished = true;
                return None;
            }
            match self
                .service
                .list_page(self.project, self.zone, self.next_page_token.as_deref())
            {
                Ok(page) => {
                    self.started = true;
                    self.next_page_token = page.next_page_token;
                    self.buffered.extend(page.items);
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcp::gce::format::{format_operation, format_status};
    use serde_json::json;
    use std::cell::Cell;

    fn instance(value: serde_json::Value) -> Instance {
        serde_json::from_value(value).unwrap()
    }

    /// Serves canned pages and counts how many page requests were made.
    struct FakeCompute {
        pages: Vec<Vec<Instance>>,
        list_calls: Cell<usize>,
    }

    impl FakeCompute {
        fn with_pages(pages: Vec<Vec<Instance>>) -> Self {
            FakeCompute {
                pages,
                list_calls: Cell::new(0),
            }
        }
    }

    impl ComputeService for FakeCompute {
        fn get_instance(
            &self,
            _project: &str,
            _zone: &str,
            name: &str,
        ) -> Result<Instance, GceError> {
            self.pages
                .iter()
                .flatten()
                .find(|i| i.name == name)
                .cloned()
                .ok_or_else(|| {
                    GceError::provider(
                        reqwest::StatusCode::NOT_FOUND,
                        r#"{"error": {"message": "Instance not found"}}"#,
                    )
                })
        }

        fn start_instance(
            &self,
            _project: &str,
            _zone: &str,
            _name: &str,
        ) -> Result<Operation, GceError> {
            Ok(serde_json::from_value(json!({"progress": 50, "status": "PENDING"})).unwrap())
        }

        fn stop_instance(
            &self,
            _project: &str,
            _zone: &str,
            _name: &str,
        ) -> Result<Operation, GceError> {
            Ok(serde_json::from_value(json!({"progress": 0, "status": "RUNNING"})).unwrap())
        }

        fn list_page(
            &self,
            _project: &str,
            _zone: &str,
            page_token: Option<&str>,
        ) -> Result<InstanceList, GceError> {
            self.list_calls.set(self.list_calls.get() + 1);
            let index: usize = page_token.map(|t| t.parse().unwrap()).unwrap_or(0);
            Ok(InstanceList {
                items: self.pages[index].clone(),
                next_page_token: (index + 1 < self.pages.len()).then(|| (index + 1).to_string()),
            })
        }
    }

    fn five_instances_in_three_pages() -> FakeCompute {
        let make = |name: &str| instance(json!({"name": name, "status": "STOPPED"}));
        FakeCompute::with_pages(vec![
            vec![make("vm-a"), make("vm-b")],
            vec![make("vm-c"), make("vm-d")],
            vec![make("vm-e")],
        ])
    }

    #[test]
    fn test_list_instances_is_lazy_and_pages_once_each() {
        let fake = five_instances_in_three_pages();

        let iter = list_instances(&fake, "proj", "us-west2-a");
        assert_eq!(fake.list_calls.get(), 0, "construction must not request");

        let names: Vec<String> = iter.map(|r| r.unwrap().name).collect();
        assert_eq!(names, vec!["vm-a", "vm-b", "vm-c", "vm-d", "vm-e"]);
        assert_eq!(fake.list_calls.get(), 3, "one request per provider page");
    }

    #[test]
    fn test_list_instances_first_page_only_costs_one_request() {
        let fake = five_instances_in_three_pages();

        let mut iter = list_instances(&fake, "proj", "us-west2-a");
        assert_eq!(iter.next().unwrap().unwrap().name, "vm-a");
        assert_eq!(iter.next().unwrap().unwrap().name, "vm-b");
        assert_eq!(fake.list_calls.get(), 1);
    }

    #[test]
    fn test_get_instance_not_found_surfaces_provider_message() {
        let fake = FakeCompute::with_pages(vec![]);
        let err = fake
            .get_instance("proj", "us-west2-a", "missing")
            .unwrap_err();
        match err {
            GceError::Provider { message, .. } => assert_eq!(message, "Instance not found"),
            other => panic!("expected Provider, got {:?}", other),
        }
    }

    #[test]
    fn test_get_then_format_running_instance() {
        let fake = FakeCompute::with_pages(vec![vec![instance(json!({
            "name": "vm-1",
            "status": "RUNNING",
            "networkInterfaces": [{"accessConfigs": [{"natIP": "1.2.3.4"}]}],
        }))]]);

        let found = fake.get_instance("proj", "us-west2-a", "vm-1").unwrap();
        assert_eq!(format_status(&found).unwrap(), "(vm-1) RUNNING 1.2.3.4");
    }

    #[test]
    fn test_start_operation_renders_progress_line() {
        let fake = FakeCompute::with_pages(vec![]);
        let operation = fake.start_instance("proj", "us-west2-a", "vm-2").unwrap();
        assert_eq!(
            format_operation("vm-2", "START", &operation),
            "(vm-2) START (progress: 50) (instance status: PENDING)"
        );
    }
}
