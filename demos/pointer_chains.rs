//! Example binding through unallocated pointers and maps

use envbind::Bind;
use std::collections::HashMap;

#[derive(Debug, Default, Bind)]
struct Limits {
    #[env("LIMIT_WORKERS")]
    pub workers: u8,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("LIMIT_WORKERS", "4");

    // None is allocated with Limits::default() before binding
    let mut limits: Option<Box<Limits>> = None;
    envbind::bind(&mut limits)?;
    println!("Limits: {limits:?}");

    // A nested None map is allocated empty, then left as is
    let mut vars: Option<Box<Option<HashMap<String, String>>>> = None;
    envbind::bind(&mut vars)?;
    println!("Vars: {vars:?}");

    // Anything that is not a struct or a String map is rejected
    let mut number = 0i64;
    if let Err(e) = envbind::bind(&mut number) {
        println!("Expected error: {e}");
    }

    Ok(())
}
