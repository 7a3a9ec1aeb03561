use serde::{Deserialize, Serialize};

use crate::security::SecurityPolicy;

/// Runtime tag for the chaincode a request targets.
///
/// The peer executes Go chaincode only, so every request is stamped with
/// [`ChaincodeRuntime::Golang`]; the tag is not caller-configurable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChaincodeRuntime {
    #[default]
    Golang,
}

/// Names the chaincode to execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeId {
    pub name: String,
}

/// Positional byte-string arguments of a chaincode call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeInput {
    pub args: Vec<Vec<u8>>,
}

impl ChaincodeInput {
    /// Marshal a function name and string arguments into the positional list.
    ///
    /// The peer treats the function name as the leading positional argument:
    /// a non-empty name lands at position 0 with the arguments following in
    /// their original order, an empty name leaves the arguments as given.
    pub fn from_call(function: &str, args: &[String]) -> Self {
        let mut out = Vec::with_capacity(args.len() + usize::from(!function.is_empty()));

        if !function.is_empty() {
            out.push(function.as_bytes().to_vec());
        }
        out.extend(args.iter().map(|arg| arg.clone().into_bytes()));

        Self { args: out }
    }
}

/// Chaincode call description as it travels to the peer.
///
/// `Option` separates fields left unset from fields present but empty. The
/// attribute list is the one field that must never be unset on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaincodeSpec {
    pub runtime: ChaincodeRuntime,
    pub chaincode_id: ChaincodeId,
    pub input: ChaincodeInput,
    pub secure_context: Option<String>,
    pub attributes: Option<Vec<String>>,
    pub metadata: Option<Vec<u8>>,
}

/// A complete invocation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationSpec {
    pub chaincode_spec: ChaincodeSpec,
    pub id_generation_alg: Option<String>,
}

impl InvocationSpec {
    /// Assemble a request from its parts.
    ///
    /// Pure: equal inputs always produce equal specs. The security policy is
    /// merged first; only afterwards is a still-unset attribute list replaced
    /// with an empty one, so a policy that carries no attributes still
    /// resolves to an empty list rather than skipping the merge.
    pub fn build(
        chaincode_name: &str,
        function: &str,
        security: Option<&SecurityPolicy>,
        args: &[String],
    ) -> Self {
        let mut spec = ChaincodeSpec {
            runtime: ChaincodeRuntime::Golang,
            chaincode_id: ChaincodeId {
                name: chaincode_name.to_owned(),
            },
            input: ChaincodeInput::from_call(function, args),
            secure_context: None,
            attributes: None,
            metadata: None,
        };
        let mut id_generation_alg = None;

        if let Some(policy) = security {
            spec.secure_context = Some(policy.user.clone());
            spec.attributes = policy.attributes.clone();
            spec.metadata = Some(policy.metadata.clone());
            if !policy.custom_id_gen_alg.is_empty() {
                id_generation_alg = Some(policy.custom_id_gen_alg.clone());
            }
        }

        if spec.attributes.is_none() {
            spec.attributes = Some(Vec::new());
        }

        Self {
            chaincode_spec: spec,
            id_generation_alg,
        }
    }
}

/// Remote operations a peer accepts over one connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerRequest {
    /// State-mutating execution of the spec.
    Invoke(InvocationSpec),
    /// Read-only execution of the spec.
    Query(InvocationSpec),
}

/// Reply to a [`PeerRequest`]: one message field either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerResponse {
    Success { msg: Vec<u8> },
    Failure { message: String },
}
