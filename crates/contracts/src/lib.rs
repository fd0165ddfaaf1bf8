//! Bindings for the contracts deployed by the bootstrap and loading of their
//! compiled creation bytecode.
//!
//! Compiling the Solidity sources is not part of this crate. The bytecode is
//! read at runtime from the JSON artifacts produced by Hardhat or Foundry.

pub mod alloy;
pub mod artifact;

pub use artifact::{Artifact, ArtifactError};
use {
    ::alloy::{
        primitives::{Address, Bytes},
        sol_types::SolValue,
    },
    std::path::Path,
};

/// Creation bytecode of both contracts.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub token: Artifact,
    pub pbm: Artifact,
}

impl Artifacts {
    pub fn load(token: &Path, pbm: &Path) -> Result<Self, ArtifactError> {
        Ok(Self {
            token: Artifact::load(token)?,
            pbm: Artifact::load(pbm)?,
        })
    }

    /// The token constructor takes no arguments.
    pub fn token_deploy_code(&self) -> Bytes {
        self.token.deploy_code(&[])
    }

    /// The PBM contract is bound to a single token at construction.
    pub fn pbm_deploy_code(&self, token: Address) -> Bytes {
        self.pbm.deploy_code(&token.abi_encode())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, ::alloy::primitives::address};

    fn artifact(bytecode: &[u8]) -> Artifact {
        Artifact {
            name: None,
            bytecode: Bytes::copy_from_slice(bytecode),
        }
    }

    #[test]
    fn pbm_deploy_code_appends_token_address() {
        let artifacts = Artifacts {
            token: artifact(&[0x60, 0x80]),
            pbm: artifact(&[0x60, 0x40]),
        };
        let token = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

        let code = artifacts.pbm_deploy_code(token);

        assert_eq!(code.len(), 2 + 32);
        assert_eq!(&code[..2], &[0x60, 0x40]);
        assert!(code[2..14].iter().all(|byte| *byte == 0));
        assert_eq!(&code[14..], token.as_slice());
    }

    #[test]
    fn token_deploy_code_is_plain_bytecode() {
        let artifacts = Artifacts {
            token: artifact(&[0x60, 0x80]),
            pbm: artifact(&[0x60, 0x40]),
        };
        assert_eq!(artifacts.token_deploy_code().as_ref(), &[0x60, 0x80]);
    }
}
