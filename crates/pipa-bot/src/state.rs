// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation states and their persisted identifiers.
//!
//! The identifier is the only thing that survives between turns, so the
//! `strum(serialize)` strings must stay stable across deployments.

use strum::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum ConversationState {
    #[strum(serialize = "INICIO")]
    Initial,
    #[strum(serialize = "ESPERANDO_OPCION_INICIAL")]
    AwaitingOption,
    #[strum(serialize = "ESPERANDO_NOMBRE_NUEVO")]
    AwaitingName,
    #[strum(serialize = "ESPERANDO_TIPO_SERVICIO")]
    AwaitingServiceType,

    // Tank branch.
    #[strum(serialize = "ESPERANDO_OPCION_ESTACIONARIO")]
    AwaitingMeasureMethod,
    #[strum(serialize = "ESPERANDO_LITROS_ESTACIONARIO")]
    AwaitingVolume,
    #[strum(serialize = "ESPERANDO_DINERO_ESTACIONARIO")]
    AwaitingMoney,
    #[strum(serialize = "ESPERANDO_CAPACIDAD_TABULADOR")]
    AwaitingCapacity,
    #[strum(serialize = "ESPERANDO_PORCENTAJE_TABULADOR")]
    AwaitingPercentage,

    // Cylinder branch.
    #[strum(serialize = "ESPERANDO_OPCION_CILINDRO")]
    AwaitingCylinderMode,
    #[strum(serialize = "ESPERANDO_CANTIDAD_CILINDRO")]
    AwaitingCylinderQuantity,
    #[strum(serialize = "CONFIRMANDO_QR_CILINDRO")]
    AwaitingCodeConfirm,

    // Common tail.
    #[strum(serialize = "ESPERANDO_METODO_PAGO")]
    AwaitingPayment,
    #[strum(serialize = "ESPERANDO_DIRECCION")]
    AwaitingAddress,
    #[strum(serialize = "CONFIRMANDO_DIRECCION")]
    AwaitingAddressConfirm,
    #[strum(serialize = "ESPERANDO_COLOR_FACHADA")]
    AwaitingFacadeColor,
    #[strum(serialize = "ESPERANDO_COLOR_PUERTA")]
    AwaitingDoorColor,
    #[strum(serialize = "ESPERANDO_HORARIO_PREMIUM")]
    AwaitingDeliveryWindow,
    #[strum(serialize = "CONFIRMANDO_PEDIDO_FINAL")]
    FinalConfirm,

    // Side flows.
    #[strum(serialize = "REPORTANDO_SELLO")]
    ReportingSeal,
    #[strum(serialize = "ESPERANDO_FOTO_SELLO")]
    AwaitingSealPhoto,
    #[strum(serialize = "RECIBIENDO_FOTO_SELLO")]
    ReceivingSealPhoto,
    #[strum(serialize = "CONFIRMANDO_ENTREGA")]
    DeliveryConfirm,
    #[strum(serialize = "ESPERANDO_CALIFICACION")]
    AwaitingRating,
}

impl ConversationState {
    /// Parse a persisted identifier. Returns `None` for unknown strings.
    pub fn from_id(id: &str) -> Option<Self> {
        id.parse().ok()
    }
}
