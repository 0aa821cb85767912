pub mod create;
pub mod get_iam_policy;
pub mod set_iam_policy;

/// An IAM service account.
///
/// A service account is an account for an application or a virtual machine (VM) instance,
/// not a person.
#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccount {
    /// The resource name of the service account, in the format
    /// `projects/{PROJECT_ID}/serviceAccounts/{EMAIL_ADDRESS}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// The email address of the service account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// A user-specified, human-readable name for the service account. Maximum 100 UTF-8 bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth2_client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}
