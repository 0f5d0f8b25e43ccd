use {
    crate::chain::{Chain, Deployment},
    alloy::primitives::{Address, Bytes},
    anyhow::{Context, Result, ensure},
    contracts::UserRecord,
    std::io::Write,
};

/// Everything a successful run learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub deployer: Address,
    pub deployment: Deployment,
    pub user: UserRecord,
}

/// Deploys `creation_code` with the chain's deployer, waits for the
/// deployment to be confirmed and reads the deployer's user record back from
/// the new contract. Progress is written to `out` as it happens, so a failure
/// never leaves a contract address behind that was not actually deployed.
pub async fn deploy_and_verify<W: Write>(
    chain: &dyn Chain,
    creation_code: Bytes,
    out: &mut W,
) -> Result<Report> {
    let deployer = chain.deployer();
    writeln!(out, "Deployer address: {deployer}")?;

    let deployment = chain.deploy(creation_code).await?;
    ensure!(
        deployment.address != deployer,
        "contract address {} equals the deployer address",
        deployment.address
    );
    tracing::info!(
        address = %deployment.address,
        transaction = %deployment.transaction_hash,
        block = ?deployment.block_number,
        gas_used = deployment.gas_used,
        "contract deployed"
    );
    writeln!(out, "Contract address: {}", deployment.address)?;

    let user = chain
        .get_user(deployment.address, deployer)
        .await
        .context("failed to read the deployer's user record")?;
    write_user(out, &user)?;

    Ok(Report {
        deployer,
        deployment,
        user,
    })
}

fn write_user<W: Write>(out: &mut W, user: &UserRecord) -> Result<()> {
    let role = match user.role() {
        Ok(role) => role.to_string(),
        Err(err) => {
            tracing::warn!(%err, "contract returned a role outside of the known ones");
            "unknown".to_string()
        }
    };
    writeln!(out, "User info:")?;
    writeln!(out, "Full Name: {}", user.full_name)?;
    writeln!(out, "Email: {}", user.email)?;
    writeln!(out, "Role: {} ({role})", user.role)?;
    writeln!(out, "Is Verified: {}", user.verified)?;
    writeln!(out, "IPFS Hash: {}", user.content_hash)?;
    Ok(())
}
