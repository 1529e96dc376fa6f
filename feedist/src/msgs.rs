//! Privileged configuration messages

use serde::{Deserialize, Serialize};
use skaf_core::{Address, AddressValidator, ConfigurationError, Context, Event};
use std::sync::Arc;

use crate::constants::{EVENT_DEVELOPER_ADDRESS_SET, EVENT_FEE_DISTRIBUTION_ENABLED};
use crate::error::{FeeDistError, Result};
use crate::keeper::FeeDistKeeper;

fn parse_field(
    validator: &dyn AddressValidator,
    field: &str,
    value: &str,
) -> std::result::Result<Address, ConfigurationError> {
    validator
        .parse(value)
        .map_err(|e| ConfigurationError::InvalidAddress(format!("invalid {} ({})", field, e)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetDeveloperAddress {
    pub creator: String,
    pub developer_address: String,
}

impl MsgSetDeveloperAddress {
    pub fn new(creator: impl Into<String>, developer_address: impl Into<String>) -> Self {
        Self {
            creator: creator.into(),
            developer_address: developer_address.into(),
        }
    }

    pub fn msg_type(&self) -> &'static str {
        "set_developer_address"
    }

    pub fn validate_basic(
        &self,
        validator: &dyn AddressValidator,
    ) -> std::result::Result<(), ConfigurationError> {
        parse_field(validator, "creator address", &self.creator)?;
        parse_field(validator, "developer address", &self.developer_address)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEnableFeeDistribution {
    pub creator: String,
    pub enabled: bool,
}

impl MsgEnableFeeDistribution {
    pub fn new(creator: impl Into<String>, enabled: bool) -> Self {
        Self {
            creator: creator.into(),
            enabled,
        }
    }

    pub fn msg_type(&self) -> &'static str {
        "enable_fee_distribution"
    }

    pub fn validate_basic(
        &self,
        validator: &dyn AddressValidator,
    ) -> std::result::Result<(), ConfigurationError> {
        parse_field(validator, "creator address", &self.creator)?;
        Ok(())
    }
}

/// Handles privileged messages on behalf of a single authority
pub struct MsgServer {
    keeper: Arc<FeeDistKeeper>,
    authority: Address,
}

impl MsgServer {
    pub fn new(keeper: Arc<FeeDistKeeper>, authority: Address) -> Self {
        Self { keeper, authority }
    }

    pub fn authority(&self) -> &Address {
        &self.authority
    }

    fn check_authority(&self, creator: &str) -> Result<()> {
        let creator = parse_field(self.keeper.address_validator(), "creator address", creator)?;
        if creator != self.authority {
            return Err(FeeDistError::Unauthorized(format!(
                "{} is not the module authority",
                creator
            )));
        }
        Ok(())
    }

    pub fn set_developer_address(
        &self,
        ctx: &mut Context,
        msg: &MsgSetDeveloperAddress,
    ) -> Result<()> {
        msg.validate_basic(self.keeper.address_validator())?;
        self.check_authority(&msg.creator)?;

        self.keeper
            .set_developer_address(ctx, &msg.developer_address)?;

        ctx.emit(
            Event::new(EVENT_DEVELOPER_ADDRESS_SET)
                .with_attribute("creator", &msg.creator)
                .with_attribute("developer_address", &msg.developer_address),
        );
        Ok(())
    }

    pub fn enable_fee_distribution(
        &self,
        ctx: &mut Context,
        msg: &MsgEnableFeeDistribution,
    ) -> Result<()> {
        msg.validate_basic(self.keeper.address_validator())?;
        self.check_authority(&msg.creator)?;

        self.keeper.set_enabled(ctx, msg.enabled)?;

        ctx.emit(
            Event::new(EVENT_FEE_DISTRIBUTION_ENABLED)
                .with_attribute("creator", &msg.creator)
                .with_attribute("enabled", msg.enabled),
        );
        Ok(())
    }
}
