//! Bindings for the deployed contracts.
//!
//! Only the functions the deployer calls are bound. The creation code is not
//! compiled in; it comes from an [`Artifact`](crate::Artifact) at runtime.

// Generate the bindings in a private module so that we can re-export them
// next to our own items.
#[allow(non_snake_case)]
mod HealthcarePrivate {
    alloy::sol!(
        #[allow(missing_docs)]
        #[sol(rpc)]
        interface Healthcare {
            function getUser(address user)
                external
                view
                returns (
                    string memory fullName,
                    string memory email,
                    uint8 role,
                    bool isVerified,
                    string memory ipfsHash
                );
        }
    );
}

#[allow(non_snake_case)]
pub mod Healthcare {
    use alloy::{
        providers::DynProvider,
        sol_types::{SolCall, SolType},
    };

    pub use super::HealthcarePrivate::Healthcare::*;
    pub type Instance = HealthcareInstance<DynProvider>;

    /// Name of the contract in source files and artifacts.
    pub const NAME: &str = "Healthcare";

    /// `getUser` as bound above, with its outputs, in the
    /// `name(inputs)(outputs)` form artifact ABIs are compared in.
    pub fn get_user_signature() -> String {
        format!(
            "{}{}",
            getUserCall::SIGNATURE,
            <<getUserCall as SolCall>::ReturnTuple<'static> as SolType>::SOL_NAME
        )
    }
}
