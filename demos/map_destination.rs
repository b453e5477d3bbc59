//! Example binding into a String to String map

use std::collections::BTreeMap;

fn main() -> anyhow::Result<()> {
    std::env::set_var("SERVICE_HOST", "api.internal");
    std::env::set_var("SERVICE_TOKEN", "s3cr3t");
    std::env::remove_var("SERVICE_REGION");

    // Only the keys already in the map are looked up
    let mut vars: BTreeMap<String, String> = ["SERVICE_HOST", "SERVICE_REGION"]
        .into_iter()
        .map(|key| (key.to_string(), String::new()))
        .collect();
    envbind::bind(&mut vars)?;

    for (key, value) in &vars {
        println!("  {key} = {value:?}");
    }

    Ok(())
}
