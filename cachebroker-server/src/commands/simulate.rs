use anyhow::{Context, Result};
use cachebroker_models::{
    BindDetails, DeprovisionDetails, Parameters, ProvisionDetails, UnbindDetails,
};
use cachebroker_orchestrations::{BrokerError, CacheBroker, InMemoryBackend};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;

/// Drive provision → poll → bind → unbind → deprovision → poll against an
/// in-memory backend, printing what the platform would see at each step
pub async fn run_simulate(
    config: Config,
    plan_id: String,
    instance_id: Option<String>,
    parameters: Option<String>,
) -> Result<()> {
    let instance_id = instance_id.unwrap_or_else(|| Uuid::new_v4().to_string());

    let parameters: Option<Parameters> = parameters
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .context("--parameters must be a JSON object")?;

    let service = config
        .elasticache_config
        .catalog
        .services
        .iter()
        .find(|service| service.plans.iter().any(|plan| plan.id == plan_id))
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Plan '{}' is not in the catalog", plan_id))?;

    let backend = Arc::new(InMemoryBackend::new());
    let broker = CacheBroker::new(config.elasticache_config, backend.clone(), backend.clone());

    println!("Simulating instance {}", instance_id);
    println!("  Service: {} ({})", service.name, service.id);
    println!("  Plan:    {}", plan_id);
    println!("  Cluster: {}", broker.cache_cluster_id(&instance_id));
    println!();

    // Step 1: Provision
    let details = ProvisionDetails {
        service_id: service.id.clone(),
        plan_id: plan_id.clone(),
        organization_guid: "simulated-org".to_string(),
        space_guid: "simulated-space".to_string(),
        parameters,
    };
    broker.provision(&instance_id, &details, true).await?;
    println!("1. provision accepted");
    print_last_operation(&broker, &instance_id).await?;

    backend.settle().await;
    print_last_operation(&broker, &instance_id).await?;

    // Step 2: Bind
    if service.bindable {
        let binding_id = Uuid::new_v4().to_string();
        let binding = broker
            .bind(&instance_id, &binding_id, &BindDetails {
                service_id: service.id.clone(),
                plan_id: plan_id.clone(),
                ..Default::default()
            })
            .await?;
        println!("2. bound {}", binding_id);
        println!("   credentials: {}", serde_json::to_string(&binding.credentials)?);

        broker.unbind(&instance_id, &binding_id, &UnbindDetails::default()).await?;
        println!("   unbound {}", binding_id);
    } else {
        println!("2. service is not bindable, skipping bind");
    }

    // Step 3: Deprovision
    broker
        .deprovision(&instance_id, &DeprovisionDetails::default(), true)
        .await?;
    println!("3. deprovision accepted");
    print_last_operation(&broker, &instance_id).await?;

    backend.settle().await;
    match broker.last_operation(&instance_id).await {
        Err(BrokerError::InstanceDoesNotExist) => println!("   instance is gone"),
        Ok(status) => anyhow::bail!("Cluster still present after deletion: {}", status.description),
        Err(e) => return Err(e.into()),
    }

    println!();
    println!("✓ Simulation complete ({} backend calls)", backend.calls().await.len());

    Ok(())
}

async fn print_last_operation(broker: &CacheBroker, instance_id: &str) -> Result<()> {
    let status = broker.last_operation(instance_id).await?;
    println!("   last operation: {:<12} {}", status.state, status.description);
    Ok(())
}
