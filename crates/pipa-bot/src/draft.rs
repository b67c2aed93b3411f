// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed in-progress orders.
//!
//! A draft lives in the session until the final confirmation turns it into a
//! [`NewOrder`]. Each branch of the flow fills its own variant, so a handler
//! never has to guess what a scratch value means.

use pipa_core::{DeliveryWindow, NewOrder, Order, PaymentMethod, ServiceVariant};
use thiserror::Error;

use crate::pricing::{PriceList, TankQuote};

/// How the customer expresses the tank quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasureMethod {
    ByVolume,
    ByMoney,
    /// Capacity is captured first, the percentage in the following turn.
    ByPercentage { capacity: Option<f64> },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TankDraft {
    pub method: Option<MeasureMethod>,
    pub quote: Option<TankQuote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CylinderMode {
    /// Picked up, refilled at the plant, returned.
    Recharge,
    /// Swapped on the spot for a full cylinder.
    Exchange,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CylinderDraft {
    pub mode: Option<CylinderMode>,
    pub count: u32,
    /// One tracking code per cylinder, recharge only.
    pub codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemDraft {
    Tank(TankDraft),
    Cylinder(CylinderDraft),
}

/// An order being assembled across turns.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub item: ItemDraft,
    pub payment: Option<PaymentMethod>,
    pub address: Option<String>,
    pub facade_color: Option<String>,
    pub door_color: Option<String>,
    pub red_code: bool,
    pub window: Option<DeliveryWindow>,
}

/// The draft lacks a field required to place the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("order draft is missing {0}")]
pub struct IncompleteDraft(pub &'static str);

impl OrderDraft {
    fn with_item(item: ItemDraft) -> Self {
        Self {
            item,
            payment: None,
            address: None,
            facade_color: None,
            door_color: None,
            red_code: false,
            window: None,
        }
    }

    pub fn tank() -> Self {
        Self::with_item(ItemDraft::Tank(TankDraft::default()))
    }

    pub fn cylinder() -> Self {
        Self::with_item(ItemDraft::Cylinder(CylinderDraft::default()))
    }

    pub fn tank_mut(&mut self) -> Option<&mut TankDraft> {
        match &mut self.item {
            ItemDraft::Tank(tank) => Some(tank),
            ItemDraft::Cylinder(_) => None,
        }
    }

    pub fn cylinder_mut(&mut self) -> Option<&mut CylinderDraft> {
        match &mut self.item {
            ItemDraft::Cylinder(cylinder) => Some(cylinder),
            ItemDraft::Tank(_) => None,
        }
    }

    /// The service variant, once the branch-specific choice has been made.
    pub fn variant(&self) -> Option<ServiceVariant> {
        match &self.item {
            ItemDraft::Tank(tank) => match tank.method? {
                MeasureMethod::ByVolume => Some(ServiceVariant::TankByVolume),
                MeasureMethod::ByMoney => Some(ServiceVariant::TankByMoney),
                MeasureMethod::ByPercentage { .. } => Some(ServiceVariant::TankByPercentage),
            },
            ItemDraft::Cylinder(cylinder) => match cylinder.mode? {
                CylinderMode::Recharge => Some(ServiceVariant::CylinderRecharge),
                CylinderMode::Exchange => Some(ServiceVariant::CylinderExchange),
            },
        }
    }

    /// Build the order to persist. Cylinder orders are quoted at delivery.
    pub fn to_new_order(
        &self,
        customer_id: i64,
        prices: &PriceList,
    ) -> Result<NewOrder, IncompleteDraft> {
        let variant = self.variant().ok_or(IncompleteDraft("service variant"))?;
        let payment = self.payment.ok_or(IncompleteDraft("payment method"))?;
        let address = self.address.clone().ok_or(IncompleteDraft("address"))?;

        let (quote, cylinder_count, tracking_codes) = match &self.item {
            ItemDraft::Tank(tank) => (tank.quote.ok_or(IncompleteDraft("quote"))?, 0, Vec::new()),
            ItemDraft::Cylinder(cylinder) => {
                if cylinder.count == 0 {
                    return Err(IncompleteDraft("cylinder count"));
                }
                let unquoted = TankQuote {
                    liters: 0.0,
                    amount: 0.0,
                    unit_price: prices.price_per_liter(),
                };
                (unquoted, cylinder.count, cylinder.codes.clone())
            }
        };

        Ok(NewOrder {
            customer_id,
            variant,
            liters: quote.liters,
            amount: quote.amount,
            unit_price: quote.unit_price,
            payment,
            address,
            door_color: self.door_color.clone(),
            facade_color: self.facade_color.clone(),
            red_code: self.red_code,
            cylinder_count,
            tracking_codes,
            window: self.window,
            status: variant.initial_status(),
        })
    }
}

/// A copy of `last` at today's price. Recharges get fresh tracking codes.
pub fn repeat_order(last: &Order, prices: &PriceList, codes: Vec<String>) -> NewOrder {
    let (liters, amount) = if last.variant.is_tank() {
        let quote = prices.by_volume(last.liters);
        (quote.liters, quote.amount)
    } else {
        (0.0, 0.0)
    };
    NewOrder {
        customer_id: last.customer_id,
        variant: last.variant,
        liters,
        amount,
        unit_price: prices.price_per_liter(),
        payment: last.payment,
        address: last.address.clone(),
        door_color: last.door_color.clone(),
        facade_color: last.facade_color.clone(),
        red_code: last.red_code,
        cylinder_count: last.cylinder_count,
        tracking_codes: codes,
        window: last.window,
        status: last.variant.initial_status(),
    }
}

#[cfg(test)]
mod tests {
    use pipa_core::OrderStatus;

    use super::*;

    fn prices() -> PriceList {
        PriceList::new(12.5)
    }

    #[test]
    fn tank_draft_becomes_pending_order() {
        let mut draft = OrderDraft::tank();
        let tank = draft.tank_mut().unwrap();
        tank.method = Some(MeasureMethod::ByVolume);
        tank.quote = Some(prices().by_volume(150.0));
        draft.payment = Some(PaymentMethod::Cash);
        draft.address = Some("Calle X".into());

        let order = draft.to_new_order(7, &prices()).unwrap();
        assert_eq!(order.customer_id, 7);
        assert_eq!(order.variant, ServiceVariant::TankByVolume);
        assert_eq!(order.liters, 150.0);
        assert_eq!(order.amount, 1875.0);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn recharge_draft_is_pending_pickup_and_unquoted() {
        let mut draft = OrderDraft::cylinder();
        let cylinder = draft.cylinder_mut().unwrap();
        cylinder.mode = Some(CylinderMode::Recharge);
        cylinder.count = 2;
        cylinder.codes = vec!["CIL-1".into(), "CIL-2".into()];
        draft.payment = Some(PaymentMethod::Card);
        draft.address = Some("Calle Y".into());

        let order = draft.to_new_order(1, &prices()).unwrap();
        assert_eq!(order.status, OrderStatus::PendingPickup);
        assert_eq!(order.amount, 0.0);
        assert_eq!(order.unit_price, 12.5);
        assert_eq!(order.tracking_codes.len(), 2);
    }

    #[test]
    fn incomplete_draft_names_missing_field() {
        let mut draft = OrderDraft::tank();
        assert_eq!(
            draft.to_new_order(1, &prices()),
            Err(IncompleteDraft("service variant"))
        );
        draft.tank_mut().unwrap().method = Some(MeasureMethod::ByMoney);
        assert_eq!(
            draft.to_new_order(1, &prices()),
            Err(IncompleteDraft("payment method"))
        );
    }

    #[test]
    fn branch_accessors_reject_the_other_branch() {
        assert!(OrderDraft::tank().cylinder_mut().is_none());
        assert!(OrderDraft::cylinder().tank_mut().is_none());
    }
}
