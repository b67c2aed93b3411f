// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer-facing reply texts.
//!
//! Replies are Spanish. Quantities are rounded here and nowhere else.

use pipa_core::{Customer, Order, ServiceVariant};

use crate::draft::{CylinderMode, ItemDraft, MeasureMethod, OrderDraft};

pub const BLOCKED: &str =
    "Tu número ha sido bloqueado por incumplir nuestras políticas. No puedes realizar nuevos pedidos.";

pub const REGISTRATION: &str = "¡Bienvenido! Para registrarte, por favor escribe tu nombre completo, \
empezando por tu apellido paterno. Ejemplo: Pérez López Juan.";

pub const GENERIC_FAILURE: &str =
    "Hubo un error procesando tu mensaje. Por favor intenta de nuevo.";

pub const DRAFT_EXPIRED: &str =
    "Tu pedido en curso expiró. Empecemos de nuevo, por favor elige una opción.";

pub const ASK_NAME: &str =
    "Por favor, escribe tu nombre completo (Apellido Paterno, Apellido Materno, Nombre).";

pub const NAME_TOO_SHORT: &str = "Por favor, ingresa al menos un apellido y un nombre.";

pub const PROFILE_UPDATED: &str = "¡Gracias! Tus datos han sido guardados.";

pub const ASK_SERVICE_TYPE: &str =
    "¿Tu servicio será para:\n1. Tanque Estacionario\n2. Cilindro";

pub const INVALID_SERVICE_TYPE: &str =
    "Opción no válida. Por favor, responde 1 para Estacionario o 2 para Cilindro.";

pub const ASK_VOLUME: &str = "Por favor, indica cuántos litros deseas cargar (ej. 150).";

pub const INVALID_VOLUME: &str = "Por favor, ingresa una cantidad válida en litros (ej. 150.5).";

pub const ASK_MONEY: &str = "Por favor, indica el monto en dinero que deseas cargar (ej. 500).";

pub const INVALID_MONEY: &str = "Por favor, ingresa una cantidad válida en dinero (ej. 500).";

pub const ASK_CAPACITY: &str =
    "Por favor, indica la capacidad total de tu tanque en litros (ej. 300).";

pub const INVALID_CAPACITY: &str = "Por favor ingresa solo números (ejemplo: 300).";

pub const ASK_PERCENTAGE: &str =
    "¿Qué porcentaje de llenado deseas?\n(recomendado: 85%)\n\nIngresa un número entre 1 y 100.";

pub const INVALID_PERCENTAGE: &str = "Por favor ingresa solo números (ejemplo: 85).";

pub const PERCENTAGE_OUT_OF_RANGE: &str = "El porcentaje debe estar entre 1 y 100.";

pub const ASK_CYLINDER_MODE: &str = "¿Qué servicio necesitas para tu cilindro?\n\
1. Recarga (pasamos por tu cilindro y te lo devolvemos lleno)\n\
2. Canje (te entregamos un cilindro lleno a cambio del tuyo)";

pub const INVALID_CYLINDER_MODE: &str =
    "Opción no válida. Por favor, responde 1 para Recarga o 2 para Canje.";

pub const INVALID_YES_NO: &str = "Opción no válida. Por favor, responde 1 para Sí o 2 para No.";

pub const INVALID_PAYMENT: &str =
    "Opción no válida. Por favor, elige 1 para Efectivo o 2 para Tarjeta.";

pub const ASK_ADDRESS: &str =
    "Por favor, escribe la dirección de entrega (calle, número, colonia y referencias).";

pub const EMPTY_ADDRESS: &str =
    "La dirección no puede estar vacía. Por favor, inténtalo de nuevo.";

pub const ASK_FACADE_COLOR: &str = "Para ayudar a nuestro repartidor, ¿de qué color es la fachada?";

pub const ASK_DOOR_COLOR: &str = "¿Y de qué color es la puerta?";

pub const EMPTY_COLOR: &str = "El color no puede estar vacío. Por favor, inténtalo de nuevo.";

pub const COLORS_SAVED: &str = "¡Perfecto! Hemos añadido los colores a tu dirección.";

pub const ASK_DELIVERY_WINDOW: &str =
    "Como cliente Premium puedes elegir tu horario de entrega:\n1. Mañana\n2. Tarde";

pub const INVALID_DELIVERY_WINDOW: &str =
    "Opción no válida. Por favor, elige 1 para Mañana o 2 para Tarde.";

pub const INVALID_FINAL_CONFIRM: &str =
    "Opción no válida. Por favor, responde 1 para confirmar o 2 para cancelar.";

pub const ORDER_CANCELLED: &str = "Tu pedido ha sido cancelado. Escríbenos cuando quieras hacer uno nuevo.";

pub const PICKUP_SCHEDULED: &str =
    "Tu pedido de recarga ha sido confirmado. Un operador pasará a recoger tu cilindro.";

pub const CYLINDER_PICKED_UP: &str = "¡Tu cilindro ha sido recogido con éxito y está en camino \
a nuestra planta para ser recargado!";

pub const ARRIVED_AT_PLANT: &str =
    "Te confirmamos que tu cilindro ha llegado a nuestra planta para ser recargado.";

pub const REFILL_STARTED: &str = "¡Buenas noticias! Tu cilindro está siendo rellenado en este momento.";

pub const SEAL_REPORT_RECEIVED: &str = "⚠️ *Reporte Recibido*\n\n\
Tu caso ha sido registrado con prioridad alta.\n\
Un supervisor se comunicará contigo en breve.";

pub const ASK_SEAL_PHOTO: &str =
    "¿Deseas enviar una foto del sello para adjuntar al reporte?\n1. Sí\n2. No";

pub const SEND_SEAL_PHOTO: &str = "Por favor, envía la foto del sello.";

pub const SEAL_REPORT_WITHOUT_PHOTO: &str = "Entendido. Tu reporte ha sido registrado sin foto.";

pub const SEAL_PHOTO_RECEIVED: &str = "Hemos recibido la imagen y la hemos añadido a tu reporte. \
Un supervisor se pondrá en contacto contigo a la brevedad.";

pub const ASK_SEAL_DESCRIPTION: &str = "Por favor indícanos qué problema tuviste con la entrega.\n\
Un supervisor revisará tu caso inmediatamente.";

pub const EMPTY_SEAL_DESCRIPTION: &str = "Por favor, describe brevemente el problema.";

pub const ORDER_NOT_FOUND: &str =
    "No encontramos el pedido a confirmar. Escríbenos si necesitas ayuda.";

pub const RATING_MENU: &str = "¡Gracias por confirmar la entrega!\n\
¿Deseas calificar nuestro servicio?\n\
1. ⭐⭐⭐⭐⭐ Excelente\n\
2. ⭐⭐⭐⭐ Muy bueno\n\
3. ⭐⭐⭐ Regular\n\
4. ⭐⭐ Malo\n\
5. ⭐ Muy malo";

pub const RATING_THANKS: &str = "¡Gracias por tu calificación! Nos ayuda a mejorar.";

pub const PROMOTED: &str = "¡Felicidades! Gracias a tu lealtad, has sido ascendido a Cliente \
Premium. A partir de ahora, podrás elegir un horario de entrega preferido para tus pedidos.";

/// Two decimals with a dollar sign.
pub fn money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Whole liters when exact, one decimal otherwise.
pub fn liters(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0} Lts")
    } else {
        format!("{value:.1} Lts")
    }
}

fn greeting_name(customer: &Customer) -> String {
    if customer.is_registered() {
        format!("{} {}", customer.given_name, customer.paternal_surname)
            .trim()
            .to_string()
    } else {
        "de nuevo".to_string()
    }
}

/// Option menu, with the repeat entry priced at today's price.
pub fn option_menu(customer: &Customer, last: Option<(&Order, f64)>) -> String {
    let name = greeting_name(customer);
    match last {
        Some((order, current_price)) => {
            let quantity = if order.variant.is_tank() {
                format!(
                    "   • {}\n   • *Precio actual: {}*",
                    liters(order.liters),
                    money(order.liters * current_price)
                )
            } else {
                format!("   • {} cilindro(s)", order.cylinder_count)
            };
            format!(
                "¡Hola {name}!\n\nElige una opción:\n\n\
                 1. Tu pedido será igual que el anterior:\n   • {}\n{quantity}\n   • {}\n\n\
                 2. Nuevo pedido\n3. Actualizar mis datos",
                order.variant.label(),
                order.address,
            )
        }
        None => format!(
            "¡Hola {name}! Veo que aún no tienes pedidos con nosotros.\n\n\
             Elige una opción:\n\n1. Hacer un nuevo pedido\n2. Actualizar mis datos"
        ),
    }
}

pub fn invalid_option(choices: usize) -> String {
    match choices {
        2 => "Opción no válida. Por favor elige 1 o 2.".to_string(),
        _ => "Opción no válida. Por favor elige 1, 2 o 3.".to_string(),
    }
}

pub fn welcome_registered(customer: &Customer) -> String {
    format!("¡Gracias {}! Ya quedaste registrado.", customer.given_name)
}

pub fn ask_measure_method(price_per_liter: f64) -> String {
    format!(
        "Tanque Estacionario (precio por litro: {}).\n¿Cómo deseas calcular tu carga?\n\
         1. Por litros\n2. Por monto en dinero\n3. Por porcentaje (tabulador)",
        money(price_per_liter)
    )
}

pub const INVALID_MEASURE_METHOD: &str = "Opción no válida. Por favor, elige 1, 2 o 3.";

pub fn ask_cylinder_quantity(max: u32) -> String {
    format!("¿Cuántos cilindros deseas? (de 1 a {max})")
}

pub fn invalid_cylinder_quantity(max: u32) -> String {
    format!("Por favor, ingresa un número válido de cilindros, de 1 a {max}.")
}

pub fn confirm_tracking_codes(codes: &[String]) -> String {
    let list: Vec<String> = codes.iter().map(|code| format!("  • {code}")).collect();
    format!(
        "Estos son los códigos de rastreo de tus cilindros:\n{}\n\n\
         Un operador pasará a recoger tu cilindro y cada uno llevará su código.\n\
         ¿Confirmas la recarga?\n1. Sí\n2. No",
        list.join("\n")
    )
}

/// Quote summary shown before asking for the payment method.
pub fn ask_payment(draft: &OrderDraft) -> String {
    format!(
        "{}\n\n¿Cómo deseas pagar?\n1. Efectivo\n2. Tarjeta (terminal)",
        quote_summary(draft)
    )
}

fn quote_summary(draft: &OrderDraft) -> String {
    match &draft.item {
        ItemDraft::Tank(tank) => match (tank.method, tank.quote) {
            (Some(MeasureMethod::ByPercentage { capacity: Some(capacity) }), Some(quote)) => {
                format!(
                    "📊 *Resumen del Cálculo*\n\n\
                     • Capacidad Total: {}\n\
                     • Porcentaje Deseado: {:.0}%\n\
                     • Litros a Cargar: {}\n\
                     • Precio por Litro: {}\n\
                     • *Total a Pagar: {}*",
                    liters(capacity),
                    quote.liters / capacity * 100.0,
                    liters(quote.liters),
                    money(quote.unit_price),
                    money(quote.amount)
                )
            }
            (_, Some(quote)) => format!(
                "Confirmación de pedido:\n• {}\n• Total: {}",
                liters(quote.liters),
                money(quote.amount)
            ),
            (_, None) => "Confirmación de pedido: Tanque Estacionario".to_string(),
        },
        ItemDraft::Cylinder(cylinder) => {
            let mode = match cylinder.mode {
                Some(CylinderMode::Recharge) => "Recarga",
                Some(CylinderMode::Exchange) => "Canje",
                None => "Cilindro",
            };
            format!(
                "Confirmación de pedido:\n• {mode} de {} cilindro(s)\n• El total se cotiza al entregar",
                cylinder.count
            )
        }
    }
}

/// Address confirmation with a map search link.
pub fn confirm_address(address: &str) -> String {
    let query: String = url::form_urlencoded::byte_serialize(address.as_bytes()).collect();
    format!(
        "Tu dirección es:\n\n*{address}*\n\n📍 https://maps.google.com/?q={query}\n\n\
         ¿Es correcta?\n1. Sí\n2. No, necesito dar más referencias"
    )
}

/// Final order summary with the driver wait-time notice.
pub fn final_summary(draft: &OrderDraft, variant: ServiceVariant) -> String {
    let mut lines = vec![
        "📝 *Resumen de tu Pedido*\n".to_string(),
        format!("  - *Servicio:* {}", variant.label()),
    ];
    match &draft.item {
        ItemDraft::Tank(tank) => {
            if let Some(quote) = tank.quote {
                lines.push(format!("  - *Cantidad:* {}", liters(quote.liters)));
                lines.push(format!("  - *Total a Pagar:* {}", money(quote.amount)));
            }
        }
        ItemDraft::Cylinder(cylinder) => {
            lines.push(format!("  - *Cilindros:* {}", cylinder.count));
            lines.push("  - *Total a Pagar:* se cotiza al entregar".to_string());
        }
    }
    if let Some(payment) = draft.payment {
        lines.push(format!("  - *Método de Pago:* {}", payment.label()));
    }
    if let Some(address) = &draft.address {
        lines.push(format!("  - *Dirección de Entrega:* {address}"));
    }
    if let Some(window) = draft.window {
        lines.push(format!("  - *Horario:* {window}"));
    }
    format!(
        "{}\n\n*Importante:* Nuestro repartidor solo podrá esperar un máximo de 10 minutos \
         en tu domicilio.\n\n¿Confirmas tu pedido?\n1. Sí, confirmar\n2. No, cancelar",
        lines.join("\n")
    )
}

pub fn order_confirmed(order: &Order) -> String {
    let detail = if order.variant.is_tank() {
        format!(
            "{} por {}",
            liters(order.liters),
            money(order.amount)
        )
    } else {
        format!("{} cilindro(s)", order.cylinder_count)
    };
    format!(
        "✅ *Pedido #{} Confirmado*\n\n{}: {detail}.\nEn breve, nuestro equipo te confirmará la entrega.",
        order.id,
        order.variant.label()
    )
}

pub fn repeat_confirmed(order: &Order) -> String {
    let detail = if order.variant.is_tank() {
        format!(
            "  - *Cantidad:* {}\n  - *Precio por Litro:* {}\n  - *Total a Pagar:* {}",
            liters(order.liters),
            money(order.unit_price),
            money(order.amount)
        )
    } else {
        format!("  - *Cilindros:* {}", order.cylinder_count)
    };
    format!(
        "✅ *Pedido #{} Confirmado*\n\n\
         Hemos registrado la repetición de tu último pedido con los precios actualizados:\n\n\
         - *Servicio:* {}\n{detail}\n\n\
         En breve, nuestro equipo te confirmará la entrega.",
        order.id,
        order.variant.label()
    )
}

pub fn ask_delivery_confirmation(order_id: i64) -> String {
    format!("¿Recibiste tu pedido #{order_id}?\n1. Sí\n2. No")
}

pub fn strike_warning(customer: &Customer, limit: u32) -> String {
    format!(
        "Hola {}. No pudimos completar tu entrega porque no se atendió a nuestro repartidor \
         en el tiempo límite de 10 minutos. Se te ha asignado un strike ({} de {limit}).\n\n\
         Tu pedido ha sido reagendado para mañana. Acumular {limit} strikes resultará en el \
         bloqueo de tu número.",
        customer.given_name, customer.strikes
    )
}

pub fn strike_block(strikes: u32) -> String {
    format!(
        "Has acumulado {strikes} strikes por no atender a nuestro repartidor. Tu número ha sido \
         bloqueado y ya no podrás realizar pedidos por este medio."
    )
}
