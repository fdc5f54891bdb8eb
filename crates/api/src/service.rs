use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// An `@RpcService` interface together with its RPC methods.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    /// Wire-level route identifier.
    pub service_name: String,
    pub package_name: String,
    pub interface_name: String,
    /// Methods in source declaration order.
    pub methods: Vec<MethodInfo>,
}

impl ServiceInfo {
    /// The key anchors are matched against: `{packageName}.{interfaceName}`.
    pub fn interface_fqn(&self) -> String {
        crate::qualified_name(&self.package_name, &self.interface_name)
    }

    pub fn method(&self, rpc_method_id: &str) -> Option<&MethodInfo> {
        self.methods
            .iter()
            .find(|m| m.rpc_method_id == rpc_method_id)
    }

    pub fn streaming_methods(&self) -> impl Iterator<Item = &MethodInfo> {
        self.methods.iter().filter(|m| m.is_streaming)
    }

    /// Checks the structural guarantees generators rely on.
    ///
    /// Method id uniqueness is a convention of the annotated sources and is
    /// not checked here.
    pub fn validate(&self) -> ApiResult<()> {
        if self.service_name.trim().is_empty() {
            return Err(ApiError::InvalidModel(format!(
                "service {} has an empty route name",
                self.interface_fqn()
            )));
        }
        if self.interface_name.trim().is_empty() {
            return Err(ApiError::InvalidModel(format!(
                "service '{}' has no interface name",
                self.service_name
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MethodInfo {
    pub rpc_method_id: String,
    pub method_name: String,
    pub parameters: Vec<ParamInfo>,
    /// Fully-qualified return type; generics and nullability kept as written,
    /// e.g. `kotlinx.coroutines.flow.Flow<kotlin.collections.List<com.x.User>>`.
    pub return_type: String,
    pub is_streaming: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: String,
    /// Fully-qualified parameter type.
    #[serde(rename = "type")]
    pub ty: String,
}
