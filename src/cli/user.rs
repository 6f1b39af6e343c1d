use inquire::{Password, Text};

use crate::auth::PasswordHasher;
use crate::error::Error;
use crate::server::validation::{validate_password, validate_user_name};
use crate::store::Store;

use super::init_store;

pub fn run_user_add(
    database_url: String,
    name: Option<String>,
    password: Option<String>,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let store = init_store(&database_url)?;

    let name = if let Some(name) = name {
        validate_user_name(&name).map_err(anyhow::Error::msg)?;
        name
    } else if non_interactive {
        anyhow::bail!("--name is required in non-interactive mode");
    } else {
        Text::new("Name:")
            .with_validator(|input: &str| {
                Ok(validate_user_name(input)
                    .map(|()| inquire::validator::Validation::Valid)
                    .unwrap_or_else(|e| inquire::validator::Validation::Invalid(e.into())))
            })
            .prompt()?
    };

    if store.get_user_by_name(&name)?.is_some() {
        anyhow::bail!("User '{}' already exists", name);
    }

    let password = if let Some(password) = password {
        validate_password(&password).map_err(anyhow::Error::msg)?;
        password
    } else if non_interactive {
        anyhow::bail!("--password is required in non-interactive mode");
    } else {
        Password::new("Password:")
            .with_validator(|input: &str| {
                Ok(validate_password(input)
                    .map(|()| inquire::validator::Validation::Valid)
                    .unwrap_or_else(|e| inquire::validator::Validation::Invalid(e.into())))
            })
            .prompt()?
    };

    let digest = PasswordHasher::new().hash(&password)?;
    let user = match store.create_user(&name, &digest) {
        Ok(user) => user,
        Err(Error::AlreadyExists) => anyhow::bail!("User '{}' already exists", name),
        Err(e) => return Err(e.into()),
    };

    println!("Created user '{}' with id {}", user.name, user.id);
    Ok(())
}

pub fn run_user_list(database_url: String, json: bool) -> anyhow::Result<()> {
    let store = init_store(&database_url)?;
    let users = store.list_users()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!("No users. Add one with 'jotter admin user add'.");
        return Ok(());
    }

    println!("{:<6} {:<24} CREATED", "ID", "NAME");
    for user in users {
        println!(
            "{:<6} {:<24} {}",
            user.id,
            user.name,
            user.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}
