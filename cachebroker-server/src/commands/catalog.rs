use anyhow::Result;
use cachebroker_models::Catalog;
use cachebroker_orchestrations::names;

use crate::config::Config;

pub fn run_check_config(config: &Config) -> Result<()> {
    let broker = &config.elasticache_config;
    let plans: usize = broker.catalog.services.iter().map(|s| s.plans.len()).sum();

    println!("✓ Config is valid");
    println!("  Region:        {}", broker.region);
    println!("  Cache prefix:  {}", broker.cache_prefix);
    println!("  Services:      {}", broker.catalog.services.len());
    println!("  Plans:         {}", plans);
    println!("  User provision parameters: {}", broker.allow_user_provision_parameters);
    println!("  User update parameters:    {}", broker.allow_user_update_parameters);

    Ok(())
}

pub fn run_catalog(catalog: &Catalog, output: &str) -> Result<()> {
    if output == "json" {
        println!("{}", serde_json::to_string_pretty(catalog)?);
        return Ok(());
    }

    println!("{:<20} {:<20} {:<10} {:<10} {:<8} {:<16}",
             "SERVICE", "PLAN", "ENGINE", "VERSION", "NODES", "NODE TYPE");
    println!("{}", "-".repeat(88));

    for service in &catalog.services {
        for plan in &service.plans {
            let properties = &plan.elasticache_properties;
            println!("{:<20} {:<20} {:<10} {:<10} {:<8} {:<16}",
                     service.name,
                     plan.name,
                     properties.engine,
                     or_dash(&properties.engine_version),
                     if properties.num_cache_nodes > 0 { properties.num_cache_nodes.to_string() } else { "-".to_string() },
                     or_dash(&properties.cache_instance_class));
        }
    }

    println!();
    println!("{} service(s) found", catalog.services.len());

    Ok(())
}

pub fn run_identifier(config: &Config, instance_id: &str) -> Result<()> {
    let id = names::cache_cluster_id(&config.elasticache_config.cache_prefix, instance_id);
    println!("{}", id);
    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
