//! [`ActorEntity`] implementation for [`Purchase`].
//!
//! The shipping state machine lives here. Each action checks, in order:
//! visibility to the caller, admin rights where required, the current status,
//! and then input validity, before touching any field.

use super::actions::{PurchaseAction, PurchaseActionResult};
use super::error::PurchaseError;
use crate::model::{
    Caller, Purchase, PurchaseCreate, PurchaseId, ShippingInfo, ShippingStatus, ShippingUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl ActorEntity for Purchase {
    type Id = PurchaseId;
    type Create = PurchaseCreate;
    type Update = ();
    type Action = PurchaseAction;
    type ActionResult = PurchaseActionResult;
    type Context = ();
    type Error = PurchaseError;

    fn id(&self) -> &PurchaseId {
        &self.id
    }

    fn from_create_params(id: PurchaseId, params: PurchaseCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params))
    }

    /// Purchases change only through lifecycle actions.
    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(PurchaseError::Validation(
            "purchases change only through lifecycle actions".into(),
        ))
    }

    async fn handle_action(
        &mut self,
        action: PurchaseAction,
        _ctx: &Self::Context,
    ) -> Result<PurchaseActionResult, Self::Error> {
        match action {
            PurchaseAction::SetShippingInfo { caller, info } => {
                self.set_shipping_info(&caller, info)?;
                Ok(PurchaseActionResult::SetShippingInfo(self.clone()))
            }
            PurchaseAction::UpdateShippingStatus { caller, update } => {
                self.update_shipping_status(&caller, update)?;
                Ok(PurchaseActionResult::UpdateShippingStatus(self.clone()))
            }
            PurchaseAction::Ship {
                caller,
                tracking_number,
                shipped_at,
            } => {
                require_admin(&caller, "ship purchases")?;
                self.require_status(ShippingStatus::Pending, "ship")?;
                self.shipping_status = ShippingStatus::Shipped;
                self.shipped_at = Some(shipped_at.unwrap_or_else(Utc::now));
                if tracking_number.is_some() {
                    self.tracking_number = tracking_number;
                }
                self.touch();
                Ok(PurchaseActionResult::Ship(self.clone()))
            }
            PurchaseAction::Cancel { caller } => {
                self.visible_to(&caller)?;
                self.require_status(ShippingStatus::Pending, "cancel")?;
                self.shipping_status = ShippingStatus::Cancelled;
                self.touch();
                Ok(PurchaseActionResult::Cancel(self.clone()))
            }
            PurchaseAction::ConfirmDelivery { caller } => {
                self.visible_to(&caller)?;
                self.require_status(ShippingStatus::Shipped, "confirm delivery of")?;
                self.shipping_status = ShippingStatus::Delivered;
                self.delivered_at = Some(Utc::now());
                self.touch();
                Ok(PurchaseActionResult::ConfirmDelivery(self.clone()))
            }
            PurchaseAction::CheckShippingInfoComplete { caller } => {
                self.visible_to(&caller)?;
                Ok(PurchaseActionResult::CheckShippingInfoComplete(
                    self.has_complete_shipping_info(),
                ))
            }
        }
    }
}

fn require_admin(caller: &Caller, operation: &str) -> Result<(), PurchaseError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(PurchaseError::PermissionDenied(format!(
            "{} may not {operation}",
            caller.user_id
        )))
    }
}

fn required(field: &str, value: String) -> Result<String, PurchaseError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(PurchaseError::Validation(format!("{field} must not be empty")));
    }
    Ok(value)
}

impl Purchase {
    fn visible_to(&self, caller: &Caller) -> Result<(), PurchaseError> {
        if caller.can_access(self.user_id) {
            Ok(())
        } else {
            Err(PurchaseError::NotFound(self.id.to_string()))
        }
    }

    fn require_status(&self, expected: ShippingStatus, operation: &str) -> Result<(), PurchaseError> {
        if self.shipping_status == expected {
            Ok(())
        } else {
            Err(PurchaseError::InvalidState {
                status: self.shipping_status,
                operation: operation.to_string(),
            })
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn set_shipping_info(&mut self, caller: &Caller, info: ShippingInfo) -> Result<(), PurchaseError> {
        self.visible_to(caller)?;
        self.require_status(ShippingStatus::Pending, "set shipping info on")?;
        let receiver_name = required("receiver name", info.receiver_name)?;
        let receiver_phone = required("receiver phone", info.receiver_phone)?;
        let shipping_address = required("shipping address", info.shipping_address)?;

        self.receiver_name = Some(receiver_name);
        self.receiver_phone = Some(receiver_phone);
        self.shipping_address = Some(shipping_address);
        self.touch();
        Ok(())
    }

    /// Admin transition. Follows the lifecycle graph; re-applying the current
    /// non-terminal status only amends tracking number and timestamps.
    /// Shipping fields may only be set for a status that owns them.
    fn update_shipping_status(
        &mut self,
        caller: &Caller,
        update: ShippingUpdate,
    ) -> Result<(), PurchaseError> {
        require_admin(caller, "update shipping status")?;
        let current = self.shipping_status;
        let next = update.shipping_status;
        let amending = next == current && !current.is_terminal();
        if !amending && !current.can_transition_to(next) {
            return Err(PurchaseError::InvalidState {
                status: current,
                operation: format!("move to {next}"),
            });
        }
        update.check_fields()?;

        self.shipping_status = next;
        if update.tracking_number.is_some() {
            self.tracking_number = update.tracking_number;
        }
        let entering = !amending;
        stamp(
            &mut self.shipped_at,
            update.shipped_at,
            next == ShippingStatus::Shipped && entering,
        );
        stamp(
            &mut self.delivered_at,
            update.delivered_at,
            next == ShippingStatus::Delivered && entering,
        );
        self.touch();
        Ok(())
    }
}

impl ShippingUpdate {
    fn check_fields(&self) -> Result<(), PurchaseError> {
        let next = self.shipping_status;
        if self.shipped_at.is_some() && next != ShippingStatus::Shipped {
            return Err(PurchaseError::Validation(format!(
                "shipped_at cannot be set on a move to {next}"
            )));
        }
        if self.delivered_at.is_some() && next != ShippingStatus::Delivered {
            return Err(PurchaseError::Validation(format!(
                "delivered_at cannot be set on a move to {next}"
            )));
        }
        if self.tracking_number.is_some()
            && matches!(next, ShippingStatus::Pending | ShippingStatus::Cancelled)
        {
            return Err(PurchaseError::Validation(format!(
                "tracking number cannot be set on a move to {next}"
            )));
        }
        Ok(())
    }
}

/// Explicit timestamps always win; otherwise `now` is recorded when the status is entered.
fn stamp(slot: &mut Option<DateTime<Utc>>, explicit: Option<DateTime<Utc>>, entering: bool) {
    match explicit {
        Some(at) => *slot = Some(at),
        None if entering => *slot = Some(Utc::now()),
        None => {}
    }
}
