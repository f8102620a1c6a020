use convoca_core::util::normalize_text_option;
use serde::Serialize;

use crate::cli::ConfigCommands;
use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub active: bool,
    pub api_base_url: Option<String>,
    pub has_access_token: bool,
    pub request_timeout_secs: Option<u64>,
}

pub fn run_config(command: ConfigCommands, global_profile: Option<&str>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            access_token,
            timeout_secs,
            no_activate,
        } => {
            let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let profile_name = init_profile(
                &mut config,
                profile.as_deref().or(global_profile),
                ProfileUpdate {
                    api_base_url,
                    access_token,
                    timeout_secs,
                },
                no_activate,
            )?;
            let path = config.save().map_err(CliError::Config)?;
            println!(
                "Profile '{}' initialized at {}",
                profile_name,
                path.display()
            );
            if config
                .profile(&profile_name)
                .and_then(CliProfile::api_base_url)
                .is_none()
            {
                println!("Profile '{profile_name}' is missing: api_base_url");
            }
            Ok(())
        }
        ConfigCommands::Show { json } => {
            let config = CliProfilesConfig::load().map_err(CliError::Config)?;
            let view = profile_view(&config, global_profile);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("profile:      {}{}", view.name, if view.active { " (active)" } else { "" });
                println!(
                    "api_base_url: {}",
                    view.api_base_url.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "access_token: {}",
                    if view.has_access_token { "[REDACTED]" } else { "(not set)" }
                );
                if let Some(secs) = view.request_timeout_secs {
                    println!("timeout:      {secs}s");
                }
            }
            Ok(())
        }
    }
}

pub struct ProfileUpdate {
    pub api_base_url: Option<String>,
    pub access_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Merge explicit values into the named profile and validate it.
pub fn init_profile(
    config: &mut CliProfilesConfig,
    profile_name: Option<&str>,
    update: ProfileUpdate,
    no_activate: bool,
) -> Result<String, CliError> {
    let profile_name = config.resolve_profile_name(profile_name);
    let profile = config.profile_mut_or_default(&profile_name);

    if let Some(url) = normalize_text_option(update.api_base_url) {
        profile.api_base_url = Some(url.trim_end_matches('/').to_string());
    }
    if let Some(token) = normalize_text_option(update.access_token) {
        profile.access_token = Some(token);
    }
    if let Some(secs) = update.timeout_secs {
        profile.request_timeout_secs = Some(secs);
    }
    profile.validate().map_err(CliError::Config)?;

    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }
    Ok(profile_name)
}

pub fn profile_view(config: &CliProfilesConfig, profile_name: Option<&str>) -> ProfileView {
    let name = config.resolve_profile_name(profile_name);
    let profile = config.profile(&name).cloned().unwrap_or_default();
    ProfileView {
        active: config.active_profile.as_deref() == Some(name.as_str()),
        api_base_url: profile.api_base_url(),
        has_access_token: normalize_text_option(profile.access_token).is_some(),
        request_timeout_secs: profile.request_timeout_secs,
        name,
    }
}
