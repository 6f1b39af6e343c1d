const MAX_USER_NAME_LEN: usize = 150;

pub fn validate_user_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("User name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_USER_NAME_LEN {
        return Err(format!(
            "User name cannot exceed {MAX_USER_NAME_LEN} characters"
        ));
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err("User name cannot contain whitespace".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    Ok(())
}
