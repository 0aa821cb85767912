//! Read-modify-write role bindings on IAM policies.
//!
//! Projects, service accounts and instances expose the same `getIamPolicy`/`setIamPolicy` pair,
//! so granting a role is written once against [`PolicyResource`]:
//!
//! 1. read the current policy,
//! 2. append `{role, [member]}` as a new binding,
//! 3. write the whole policy back with the etag that was read.
//!
//! Existing bindings with the same role are never merged, so granting the same role twice leaves two
//! entries in the policy.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};

use crate::error::Error;
use crate::http::compute_instance_client::ComputeInstanceClient;
use crate::http::error::Error as HttpError;
use crate::http::iam_service_account_client::IamServiceAccountClient;
use crate::http::resource_manager_project_client::ResourceManagerProjectClient;
use crate::http::types::{Binding, GetPolicyOptions, Policy};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MemberKind {
    User,
    Group,
    ServiceAccount,
}

impl MemberKind {
    fn prefix(&self) -> &'static str {
        match self {
            MemberKind::User => "user",
            MemberKind::Group => "group",
            MemberKind::ServiceAccount => "serviceAccount",
        }
    }
}

/// A principal in the `{kind}:{email}` form used by policy bindings.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Member(String);

impl Member {
    pub fn new(kind: MemberKind, email: &str) -> Self {
        Self(format!("{}:{}", kind.prefix(), email))
    }

    pub fn user(email: &str) -> Self {
        Self::new(MemberKind::User, email)
    }

    pub fn group(email: &str) -> Self {
        Self::new(MemberKind::Group, email)
    }

    pub fn service_account(email: &str) -> Self {
        Self::new(MemberKind::ServiceAccount, email)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Member> for String {
    fn from(member: Member) -> Self {
        member.0
    }
}

/// A resource carrying an IAM policy.
#[async_trait]
pub trait PolicyResource: Send + Sync {
    /// Human readable resource identifier used in errors and logs.
    fn resource_name(&self) -> String;

    async fn get_policy(&self) -> Result<Policy, HttpError>;

    async fn set_policy(&self, policy: Policy) -> Result<Policy, HttpError>;
}

/// Bounded exponential backoff for re-running a read-modify-write that lost a concurrent update.
#[derive(Clone, Debug)]
pub struct RetrySetting {
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_retries: usize,
}

impl Default for RetrySetting {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            max_retries: 3,
        }
    }
}

impl RetrySetting {
    fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}

/// Grants `role` to `member` on `resource`.
///
/// Returns the policy as written by the server. With a [`RetrySetting`], a set that fails with a
/// conflict (HTTP 409 or 412) re-runs the whole cycle starting from a fresh read.
pub async fn add_binding<R>(
    resource: &R,
    role: &str,
    member: &Member,
    retry: Option<&RetrySetting>,
) -> Result<Policy, Error>
where
    R: PolicyResource + ?Sized,
{
    let attempt = || add_binding_once(resource, role, member);
    match retry {
        None => attempt().await,
        Some(setting) => {
            attempt
                .retry(setting.backoff())
                .when(is_conflict)
                .notify(|e, delay| {
                    tracing::warn!("retrying iam policy update after {:?}: {}", delay, e);
                })
                .await
        }
    }
}

async fn add_binding_once<R>(resource: &R, role: &str, member: &Member) -> Result<Policy, Error>
where
    R: PolicyResource + ?Sized,
{
    let name = resource.resource_name();
    let mut policy = resource
        .get_policy()
        .await
        .map_err(|e| Error::GetPolicy(name.clone(), e))?;
    tracing::debug!(
        "read iam policy of {} etag={:?} bindings={}",
        name,
        policy.etag,
        policy.bindings.len()
    );
    policy.bindings.push(Binding {
        role: role.to_string(),
        members: vec![member.to_string()],
        condition: None,
    });
    resource.set_policy(policy).await.map_err(|e| Error::SetPolicy(name, e))
}

fn is_conflict(e: &Error) -> bool {
    matches!(e, Error::SetPolicy(_, http) if http.is_conflict())
}

/// The IAM policy of a project.
pub struct ProjectPolicy<'a> {
    pub client: &'a ResourceManagerProjectClient,
    pub project_id: &'a str,
}

#[async_trait]
impl PolicyResource for ProjectPolicy<'_> {
    fn resource_name(&self) -> String {
        format!("projects/{}", self.project_id)
    }

    async fn get_policy(&self) -> Result<Policy, HttpError> {
        self.client
            .get_iam_policy(self.project_id, &GetPolicyOptions::default())
            .await
    }

    async fn set_policy(&self, policy: Policy) -> Result<Policy, HttpError> {
        self.client.set_iam_policy(self.project_id, policy).await
    }
}

/// The IAM policy of a service account, controlling who may act as it.
pub struct ServiceAccountPolicy<'a> {
    pub client: &'a IamServiceAccountClient,
    pub project_id: &'a str,
    pub email: &'a str,
}

#[async_trait]
impl PolicyResource for ServiceAccountPolicy<'_> {
    fn resource_name(&self) -> String {
        format!("projects/{}/serviceAccounts/{}", self.project_id, self.email)
    }

    async fn get_policy(&self) -> Result<Policy, HttpError> {
        self.client
            .get_iam_policy(self.project_id, self.email, &GetPolicyOptions::default())
            .await
    }

    async fn set_policy(&self, policy: Policy) -> Result<Policy, HttpError> {
        self.client.set_iam_policy(self.project_id, self.email, policy).await
    }
}

/// The IAM policy of a Compute Engine instance.
pub struct InstancePolicy<'a> {
    pub client: &'a ComputeInstanceClient,
    pub project_id: &'a str,
    pub zone: &'a str,
    pub instance: &'a str,
}

#[async_trait]
impl PolicyResource for InstancePolicy<'_> {
    fn resource_name(&self) -> String {
        format!("projects/{}/zones/{}/instances/{}", self.project_id, self.zone, self.instance)
    }

    async fn get_policy(&self) -> Result<Policy, HttpError> {
        self.client
            .get_iam_policy(self.project_id, self.zone, self.instance, &GetPolicyOptions::default())
            .await
    }

    async fn set_policy(&self, policy: Policy) -> Result<Policy, HttpError> {
        self.client
            .set_iam_policy(self.project_id, self.zone, self.instance, policy)
            .await
    }
}

#[cfg(test)]
mod test {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::Error;
    use crate::http::error::{Error as HttpError, ErrorResponse};
    use crate::http::types::{Binding, Policy};
    use crate::iam::{add_binding, Member, MemberKind, PolicyResource, RetrySetting};

    fn response_error(code: u16, message: &str) -> HttpError {
        HttpError::Response(ErrorResponse {
            code,
            message: message.to_string(),
            status: None,
            errors: vec![],
        })
    }

    /// Policy store that rejects writes carrying a stale etag.
    struct InMemoryPolicy {
        policy: Mutex<Policy>,
        generation: Mutex<u32>,
        fail_get: bool,
        fail_set: bool,
        /// Concurrent writers that sneak in between our read and write.
        interleaved_writes: Mutex<u32>,
        sets: Mutex<Vec<Policy>>,
    }

    impl InMemoryPolicy {
        fn new(bindings: Vec<Binding>) -> Self {
            Self {
                policy: Mutex::new(Policy {
                    version: Some(1),
                    bindings,
                    etag: Some("etag-0".to_string()),
                    ..Default::default()
                }),
                generation: Mutex::new(0),
                fail_get: false,
                fail_set: false,
                interleaved_writes: Mutex::new(0),
                sets: Mutex::new(vec![]),
            }
        }

        fn bump(&self, policy: &mut Policy) {
            let mut generation = self.generation.lock().unwrap();
            *generation += 1;
            policy.etag = Some(format!("etag-{generation}"));
        }

        fn current(&self) -> Policy {
            self.policy.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PolicyResource for InMemoryPolicy {
        fn resource_name(&self) -> String {
            "projects/example".to_string()
        }

        async fn get_policy(&self) -> Result<Policy, HttpError> {
            if self.fail_get {
                return Err(response_error(403, "permission denied"));
            }
            let policy = self.current();
            let mut interleaved = self.interleaved_writes.lock().unwrap();
            if *interleaved > 0 {
                *interleaved -= 1;
                let mut stored = self.policy.lock().unwrap();
                self.bump(&mut stored);
            }
            Ok(policy)
        }

        async fn set_policy(&self, policy: Policy) -> Result<Policy, HttpError> {
            self.sets.lock().unwrap().push(policy.clone());
            if self.fail_set {
                return Err(response_error(400, "invalid argument"));
            }
            let mut stored = self.policy.lock().unwrap();
            if stored.etag != policy.etag {
                return Err(response_error(409, "There were concurrent policy changes."));
            }
            *stored = policy;
            self.bump(&mut stored);
            Ok(stored.clone())
        }
    }

    fn owner_binding() -> Binding {
        Binding {
            role: "roles/owner".to_string(),
            members: vec!["user:owner@example.com".to_string()],
            condition: None,
        }
    }

    #[test]
    fn test_member() {
        assert_eq!(
            Member::service_account("aether-009@example.iam.gserviceaccount.com").to_string(),
            "serviceAccount:aether-009@example.iam.gserviceaccount.com"
        );
        assert_eq!(Member::user("owner@example.com").as_str(), "user:owner@example.com");
        assert_eq!(Member::group("ops@example.com").as_str(), "group:ops@example.com");
        assert_eq!(Member::new(MemberKind::User, "").as_str(), "user:");
        let raw: String = Member::user("a@b").into();
        assert_eq!(raw, "user:a@b");
    }

    #[tokio::test]
    async fn test_add_binding_appends() {
        let resource = InMemoryPolicy::new(vec![owner_binding()]);
        let member = Member::user("owner@example.com");
        let policy = add_binding(&resource, "roles/compute.viewer", &member, None)
            .await
            .unwrap();

        assert_eq!(policy.bindings.len(), 2);
        assert_eq!(policy.bindings[0], owner_binding());
        let last = policy.bindings.last().unwrap();
        assert_eq!(last.role, "roles/compute.viewer");
        assert_eq!(last.members, vec!["user:owner@example.com"]);

        let sets = resource.sets.lock().unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].etag.as_deref(), Some("etag-0"));
    }

    #[tokio::test]
    async fn test_add_binding_twice_keeps_duplicates() {
        let resource = InMemoryPolicy::new(vec![]);
        let member = Member::user("owner@example.com");
        add_binding(&resource, "roles/compute.osAdminLogin", &member, None)
            .await
            .unwrap();
        add_binding(&resource, "roles/compute.osAdminLogin", &member, None)
            .await
            .unwrap();

        let policy = resource.current();
        let count = policy
            .bindings
            .iter()
            .filter(|b| b.role == "roles/compute.osAdminLogin")
            .count();
        assert_eq!(count, 2);
        assert_eq!(policy.etag.as_deref(), Some("etag-2"));
    }

    #[tokio::test]
    async fn test_get_failure_does_not_write() {
        let mut resource = InMemoryPolicy::new(vec![owner_binding()]);
        resource.fail_get = true;
        let err = add_binding(&resource, "roles/editor", &Member::user("owner@example.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::GetPolicy(ref name, _) if name == "projects/example"));
        assert!(resource.sets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_failure() {
        let mut resource = InMemoryPolicy::new(vec![owner_binding()]);
        resource.fail_set = true;
        let err = add_binding(&resource, "roles/editor", &Member::user("owner@example.com"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SetPolicy(_, _)));
        assert_eq!(resource.current().bindings, vec![owner_binding()]);
    }

    #[tokio::test]
    async fn test_conflict_without_retry() {
        let resource = InMemoryPolicy::new(vec![]);
        *resource.interleaved_writes.lock().unwrap() = 1;
        let err = add_binding(&resource, "roles/editor", &Member::user("owner@example.com"), None)
            .await
            .unwrap_err();
        assert!(err.http().unwrap().is_conflict());
        assert!(resource.current().bindings.is_empty());
    }

    #[tokio::test]
    async fn test_conflict_with_retry() {
        let resource = InMemoryPolicy::new(vec![]);
        *resource.interleaved_writes.lock().unwrap() = 2;
        let retry = RetrySetting {
            min_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            max_retries: 3,
        };
        let policy = add_binding(&resource, "roles/editor", &Member::user("owner@example.com"), Some(&retry))
            .await
            .unwrap();
        assert_eq!(policy.bindings.len(), 1);
        assert_eq!(resource.sets.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_retry_ignores_other_errors() {
        let mut resource = InMemoryPolicy::new(vec![]);
        resource.fail_set = true;
        let retry = RetrySetting {
            min_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            max_retries: 3,
        };
        let err = add_binding(&resource, "roles/editor", &Member::user("owner@example.com"), Some(&retry))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SetPolicy(_, _)));
        assert_eq!(resource.sets.lock().unwrap().len(), 1);
    }
}
