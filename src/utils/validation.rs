use crate::utils::error::{RosterError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RosterError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Namespaces prefix every group key as `<namespace>:<group>`, so they may not
/// contain the separator themselves.
pub fn validate_namespace(field_name: &str, namespace: &str) -> Result<()> {
    validate_non_empty_string(field_name, namespace)?;

    if namespace.contains(':') {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: namespace.to_string(),
            reason: "Namespace cannot contain ':'".to_string(),
        });
    }
    Ok(())
}

/// Checked when a group is written; reads and removals treat `""` as an absent key.
pub fn validate_group_name(group: &str) -> Result<()> {
    if group.is_empty() {
        return Err(RosterError::InvalidGroupName {
            message: "Group name cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_namespace() {
        assert!(validate_namespace("store.namespace", "roster.players").is_ok());
        assert!(validate_namespace("store.namespace", "").is_err());
        assert!(validate_namespace("store.namespace", "   ").is_err());
        assert!(validate_namespace("store.namespace", "a:b").is_err());
    }

    #[test]
    fn test_validate_group_name() {
        assert!(validate_group_name("Turma1").is_ok());
        assert!(validate_group_name(" padded ").is_ok());
        assert!(validate_group_name("  ").is_ok());
        assert!(matches!(
            validate_group_name(""),
            Err(RosterError::InvalidGroupName { .. })
        ));
    }

    #[test]
    fn test_validate_s3_settings() {
        assert!(validate_s3_bucket_name("s3.bucket", "roster-data").is_ok());
        assert!(validate_s3_bucket_name("s3.bucket", "ab").is_err());
        assert!(validate_s3_bucket_name("s3.bucket", "Roster").is_err());
        assert!(validate_s3_bucket_name("s3.bucket", "-roster").is_err());

        assert!(validate_aws_region("s3.region", "sa-east-1").is_ok());
        assert!(validate_aws_region("s3.region", "SA_EAST").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let absent: Option<u32> = None;
        assert_eq!(*validate_required_field("x", &present).unwrap(), 3);
        assert!(matches!(
            validate_required_field("s3", &absent),
            Err(RosterError::MissingConfigError { .. })
        ));
    }
}
