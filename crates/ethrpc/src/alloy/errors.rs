use alloy::{contract::Error as ContractError, transports::RpcError};

/// Where a failed contract interaction went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The node could not be reached or did not answer with a usable
    /// response.
    Node,
    /// The node executed the request and the contract rejected it, or its
    /// answer could not be decoded with the bound ABI.
    Contract,
}

pub trait ContractErrorExt {
    fn kind(&self) -> ErrorKind;

    /// Returns whether a given error is a node error.
    fn is_node_error(&self) -> bool {
        self.kind() == ErrorKind::Node
    }
}

impl ContractErrorExt for ContractError {
    fn kind(&self) -> ErrorKind {
        match self {
            // Reverts surface as JSON-RPC error responses carrying revert data,
            // even when that data is empty (e.g. a call to a missing function).
            ContractError::TransportError(RpcError::ErrorResp(err)) => {
                let no_revert_data = err.as_revert_data().is_none();
                tracing::debug!(?err, %no_revert_data, "transport rpc error");
                if no_revert_data {
                    ErrorKind::Node
                } else {
                    ErrorKind::Contract
                }
            }
            ContractError::TransportError(_) => ErrorKind::Node,
            _ => ErrorKind::Contract,
        }
    }
}
