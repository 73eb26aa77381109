use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
        println!("Edit [bootstrap] before running: petshop bootstrap");
    } else {
        println!("config.toml already exists, leaving it untouched.");
    }
    Ok(())
}
