// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation flows driven through the dispatcher with mock adapters.

mod common;

use std::time::Duration;

use common::Harness;
use pipa_bot::draft::ItemDraft;
use pipa_bot::replies;
use pipa_core::{
    Category, DeliveryWindow, OrderStatus, PaymentMethod, PhotoStatus, PipaError, ServiceVariant,
    StorageAdapter,
};
use pipa_test_utils::fixtures;

const PHONE: &str = "5215550001";

const TO_FINAL_CONFIRM: &[&str] = &["tanque", "1", "150", "efectivo", "Calle X", "si"];

#[tokio::test]
async fn first_message_registers_customer() {
    let h = Harness::new();
    h.send(PHONE, "hola").await.unwrap();

    assert_eq!(h.replies(PHONE).await, vec![replies::REGISTRATION.to_string()]);
    let customer = h.customer(PHONE).await;
    assert_eq!(customer.conversation_state, "ESPERANDO_NOMBRE_NUEVO");
    assert!(!customer.is_registered());
}

#[tokio::test]
async fn registration_splits_full_name() {
    let h = Harness::new();
    h.register(PHONE).await;

    let customer = h.customer(PHONE).await;
    assert_eq!(customer.paternal_surname, "Pérez");
    assert_eq!(customer.maternal_surname, "López");
    assert_eq!(customer.given_name, "Juan");
    assert_eq!(customer.conversation_state, "ESPERANDO_TIPO_SERVICIO");
    assert_eq!(h.last_reply(PHONE).await, replies::ASK_SERVICE_TYPE);
}

#[tokio::test]
async fn single_word_name_is_rejected() {
    let h = Harness::new();
    h.script(PHONE, &["hola", "Juan"]).await;

    assert_eq!(h.state(PHONE).await, "ESPERANDO_NOMBRE_NUEVO");
    assert_eq!(h.last_reply(PHONE).await, replies::NAME_TOO_SHORT);
    assert!(!h.customer(PHONE).await.is_registered());
}

#[tokio::test]
async fn tank_order_by_volume_end_to_end() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, TO_FINAL_CONFIRM).await;
    assert_eq!(h.state(PHONE).await, "CONFIRMANDO_PEDIDO_FINAL");
    assert!(h.last_reply(PHONE).await.contains("10 minutos"));

    h.send(PHONE, "si").await.unwrap();

    let orders = h.storage.orders().await;
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order.variant, ServiceVariant::TankByVolume);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.liters, 150.0);
    assert_eq!(order.amount, 1875.0);
    assert_eq!(order.payment, PaymentMethod::Cash);
    assert_eq!(order.address, "Calle X");
    assert_eq!(h.state(PHONE).await, "INICIO");
    assert!(h.last_reply(PHONE).await.contains("Pedido #1 Confirmado"));
    assert!(!h.has_draft(PHONE).await);
}

#[tokio::test]
async fn english_keywords_are_accepted() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, &["tank", "by volume", "150", "cash", "Calle X", "yes", "yes"])
        .await;

    assert_eq!(h.storage.orders().await.len(), 1);
    assert_eq!(h.state(PHONE).await, "INICIO");
}

#[tokio::test]
async fn money_quote_converts_to_liters() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, &["estacionario", "dinero", "$1,000"]).await;

    assert_eq!(h.state(PHONE).await, "ESPERANDO_METODO_PAGO");
    let reply = h.last_reply(PHONE).await;
    assert!(reply.contains("80 Lts"), "{reply}");
    assert!(reply.contains("$1000.00"), "{reply}");
}

#[tokio::test]
async fn tabulator_quote_uses_capacity_and_percentage() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, &["tanque", "3", "300 litros"]).await;
    assert_eq!(h.state(PHONE).await, "ESPERANDO_PORCENTAJE_TABULADOR");

    h.send(PHONE, "150").await.unwrap();
    assert_eq!(h.state(PHONE).await, "ESPERANDO_PORCENTAJE_TABULADOR");
    assert_eq!(h.last_reply(PHONE).await, replies::PERCENTAGE_OUT_OF_RANGE);

    h.send(PHONE, "85%").await.unwrap();
    assert_eq!(h.state(PHONE).await, "ESPERANDO_METODO_PAGO");
    let reply = h.last_reply(PHONE).await;
    assert!(reply.contains("255 Lts"), "{reply}");
    assert!(reply.contains("$3187.50"), "{reply}");

    h.script(PHONE, &["2", "Calle X", "1", "1"]).await;
    let order = &h.storage.orders().await[0];
    assert_eq!(order.variant, ServiceVariant::TankByPercentage);
    assert!((order.liters - 255.0).abs() < 1e-9);
    assert!((order.amount - 3187.5).abs() < 1e-9);
    assert_eq!(order.payment, PaymentMethod::Card);
}

#[tokio::test]
async fn unrecognized_menu_replies_keep_state() {
    let cases: &[(&[&str], &str, &str)] = &[
        (&[], "moto", "ESPERANDO_TIPO_SERVICIO"),
        (&["tanque"], "4", "ESPERANDO_OPCION_ESTACIONARIO"),
        (&["tanque", "1", "150"], "bitcoin", "ESPERANDO_METODO_PAGO"),
        (&["tanque", "1", "150", "efectivo", "Calle X"], "quizas", "CONFIRMANDO_DIRECCION"),
        (TO_FINAL_CONFIRM, "tal vez", "CONFIRMANDO_PEDIDO_FINAL"),
        (&["cilindro"], "3", "ESPERANDO_OPCION_CILINDRO"),
        (&["cilindro", "recarga", "2"], "x", "CONFIRMANDO_QR_CILINDRO"),
        (&["reportar sello"], "quizas", "ESPERANDO_FOTO_SELLO"),
    ];

    for (setup, reply, state) in cases {
        let h = Harness::new();
        h.register(PHONE).await;
        h.script(PHONE, setup).await;
        assert_eq!(h.state(PHONE).await, *state, "setup {setup:?}");

        let before = h.replies(PHONE).await.len();
        h.send(PHONE, reply).await.unwrap();
        assert_eq!(h.state(PHONE).await, *state, "reply {reply:?} moved state");
        assert_eq!(h.replies(PHONE).await.len(), before + 1, "no re-prompt for {reply:?}");
    }

    // Delivery confirmation is only reachable through the operator action.
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, TO_FINAL_CONFIRM).await;
    h.send(PHONE, "si").await.unwrap();
    h.bot.request_delivery_confirmation(PHONE, None).await.unwrap();
    assert_eq!(h.state(PHONE).await, "CONFIRMANDO_ENTREGA");

    let before = h.replies(PHONE).await.len();
    h.send(PHONE, "tal vez").await.unwrap();
    assert_eq!(h.state(PHONE).await, "CONFIRMANDO_ENTREGA");
    assert_eq!(h.replies(PHONE).await.len(), before + 1);
    assert_eq!(h.last_reply(PHONE).await, replies::INVALID_YES_NO);
    assert_eq!(h.storage.orders().await[0].status, OrderStatus::Pending);
}

#[tokio::test]
async fn option_menu_rejects_out_of_range_choice() {
    let h = Harness::new();
    h.storage
        .put_customer(fixtures::registered_customer(1, PHONE, "INICIO"))
        .await;
    h.script(PHONE, &["hola", "7"]).await;

    assert_eq!(h.state(PHONE).await, "ESPERANDO_OPCION_INICIAL");
    assert_eq!(h.last_reply(PHONE).await, replies::invalid_option(2));
}

#[tokio::test]
async fn numeric_states_reject_text_without_touching_the_draft() {
    let cases: &[(&[&str], &str, &str)] = &[
        (&["tanque", "1"], "mucho", "ESPERANDO_LITROS_ESTACIONARIO"),
        (&["tanque", "2"], "abc", "ESPERANDO_DINERO_ESTACIONARIO"),
        (&["tanque", "3"], "grande", "ESPERANDO_CAPACIDAD_TABULADOR"),
        (&["tanque", "3", "300"], "casi lleno", "ESPERANDO_PORCENTAJE_TABULADOR"),
        (&["cilindro", "canje"], "muchos", "ESPERANDO_CANTIDAD_CILINDRO"),
    ];

    for (setup, reply, state) in cases {
        let h = Harness::new();
        h.register(PHONE).await;
        h.script(PHONE, setup).await;
        let before = h.bot.sessions().session(PHONE).lock().await.draft.clone();

        h.send(PHONE, reply).await.unwrap();

        assert_eq!(h.state(PHONE).await, *state);
        let after = h.bot.sessions().session(PHONE).lock().await.draft.clone();
        assert_eq!(before, after, "{reply:?} mutated the draft");
        assert!(h.storage.orders().await.is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn cylinder_recharge_with_colors_and_pickup_notice() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, &["cilindro", "recarga", "2"]).await;
    assert_eq!(h.state(PHONE).await, "CONFIRMANDO_QR_CILINDRO");
    assert!(h.last_reply(PHONE).await.contains("CIL-"));

    h.script(PHONE, &["si", "tarjeta", "Calle Y 10", "no", "azul", "roja"]).await;
    assert_eq!(h.state(PHONE).await, "CONFIRMANDO_PEDIDO_FINAL");
    let customer = h.customer(PHONE).await;
    assert!(customer.red_code);
    assert_eq!(customer.facade_color.as_deref(), Some("azul"));
    assert_eq!(customer.door_color.as_deref(), Some("roja"));
    assert!(h.replies(PHONE).await.contains(&replies::COLORS_SAVED.to_string()));

    h.send(PHONE, "1").await.unwrap();
    let order = &h.storage.orders().await[0];
    assert_eq!(order.variant, ServiceVariant::CylinderRecharge);
    assert_eq!(order.status, OrderStatus::PendingPickup);
    assert_eq!(order.cylinder_count, 2);
    assert_eq!(order.tracking_codes.len(), 2);
    assert_ne!(order.tracking_codes[0], order.tracking_codes[1]);
    assert!(order.tracking_codes.iter().all(|c| c.starts_with("CIL-")));
    assert!(order.red_code);
    assert_eq!(order.door_color.as_deref(), Some("roja"));
    assert!(h.last_reply(PHONE).await.contains(replies::PICKUP_SCHEDULED));

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert_eq!(h.last_reply(PHONE).await, replies::CYLINDER_PICKED_UP);
}

#[tokio::test]
async fn cylinder_quantity_is_bounded() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, &["cilindro", "canje", "4"]).await;
    assert_eq!(h.state(PHONE).await, "ESPERANDO_CANTIDAD_CILINDRO");
    assert_eq!(h.last_reply(PHONE).await, replies::invalid_cylinder_quantity(3));

    h.send(PHONE, "3").await.unwrap();
    assert_eq!(h.state(PHONE).await, "ESPERANDO_METODO_PAGO");
}

#[tokio::test]
async fn rejecting_tracking_codes_returns_to_mode_question() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, &["cilindro", "recarga", "1", "no"]).await;

    assert_eq!(h.state(PHONE).await, "ESPERANDO_OPCION_CILINDRO");
    assert_eq!(h.last_reply(PHONE).await, replies::ASK_CYLINDER_MODE);
    let draft = h.bot.sessions().session(PHONE).lock().await.draft.clone();
    match draft.map(|d| d.item) {
        Some(ItemDraft::Cylinder(cylinder)) => {
            assert!(cylinder.mode.is_none());
            assert!(cylinder.codes.is_empty());
        }
        other => panic!("expected cylinder draft, got {other:?}"),
    }
}

#[tokio::test]
async fn premium_customer_picks_delivery_window() {
    let h = Harness::new();
    h.register(PHONE).await;
    assert!(h.bot.promote_to_premium(PHONE).await.unwrap());
    assert_eq!(h.customer(PHONE).await.category, Category::Premium);

    h.script(PHONE, &["tanque", "1", "100", "1", "Calle Z", "1"]).await;
    assert_eq!(h.state(PHONE).await, "ESPERANDO_HORARIO_PREMIUM");

    h.send(PHONE, "hoy").await.unwrap();
    assert_eq!(h.last_reply(PHONE).await, replies::INVALID_DELIVERY_WINDOW);

    h.script(PHONE, &["tarde", "1"]).await;
    let order = &h.storage.orders().await[0];
    assert_eq!(order.window, Some(DeliveryWindow::Afternoon));
}

#[tokio::test]
async fn cancelling_at_final_confirmation_discards_draft() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, TO_FINAL_CONFIRM).await;
    h.send(PHONE, "no").await.unwrap();

    assert!(h.storage.orders().await.is_empty());
    assert_eq!(h.state(PHONE).await, "INICIO");
    assert_eq!(h.last_reply(PHONE).await, replies::ORDER_CANCELLED);
    assert!(!h.has_draft(PHONE).await);
}

#[tokio::test]
async fn storage_failure_at_confirmation_keeps_draft_for_retry() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, TO_FINAL_CONFIRM).await;

    h.storage.set_fail_order_writes(true);
    let err = h.send(PHONE, "si").await.unwrap_err();
    assert!(err.is_storage());
    assert_eq!(h.state(PHONE).await, "CONFIRMANDO_PEDIDO_FINAL");
    assert_eq!(h.last_reply(PHONE).await, replies::GENERIC_FAILURE);
    assert!(h.has_draft(PHONE).await);
    assert!(h.storage.orders().await.is_empty());

    h.storage.set_fail_order_writes(false);
    h.send(PHONE, "si").await.unwrap();
    assert_eq!(h.storage.orders().await.len(), 1);
    assert_eq!(h.state(PHONE).await, "INICIO");
}

#[tokio::test]
async fn failed_confirmation_send_does_not_duplicate_order() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, TO_FINAL_CONFIRM).await;

    h.channel.set_failing(true);
    let err = h.send(PHONE, "si").await.unwrap_err();
    assert!(matches!(err, PipaError::Channel { .. }));
    assert_eq!(h.storage.orders().await.len(), 1);
    assert_eq!(h.state(PHONE).await, "CONFIRMANDO_PEDIDO_FINAL");

    h.channel.set_failing(false);
    h.send(PHONE, "si").await.unwrap();
    assert_eq!(h.storage.orders().await.len(), 1);
    assert!(h.last_reply(PHONE).await.contains("Pedido #1 Confirmado"));
    assert_eq!(h.state(PHONE).await, "INICIO");
}

#[tokio::test]
async fn lost_draft_restarts_from_option_menu() {
    let h = Harness::new();
    h.storage
        .put_customer(fixtures::registered_customer(1, PHONE, "ESPERANDO_METODO_PAGO"))
        .await;

    h.send(PHONE, "efectivo").await.unwrap();

    let replies_sent = h.replies(PHONE).await;
    assert_eq!(replies_sent[0], replies::DRAFT_EXPIRED);
    assert!(replies_sent[1].contains("Elige una opción"));
    assert_eq!(h.state(PHONE).await, "ESPERANDO_OPCION_INICIAL");
}

#[tokio::test]
async fn unknown_persisted_state_resets_to_initial() {
    let h = Harness::new();
    h.storage
        .put_customer(fixtures::registered_customer(1, PHONE, "ESTADO_RARO"))
        .await;

    let err = h.send(PHONE, "hola").await.unwrap_err();
    assert!(matches!(err, PipaError::UnknownState { ref state } if state == "ESTADO_RARO"));
    assert_eq!(h.state(PHONE).await, "INICIO");
    assert_eq!(h.last_reply(PHONE).await, replies::GENERIC_FAILURE);
}

#[tokio::test]
async fn seal_keyword_interrupts_any_state() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, &["tanque", "1"]).await;
    assert!(h.has_draft(PHONE).await);

    h.send(PHONE, "Reportar sello: venía roto").await.unwrap();

    assert_eq!(h.state(PHONE).await, "ESPERANDO_FOTO_SELLO");
    assert!(!h.has_draft(PHONE).await);
    let reports = h.storage.seal_reports().await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].description, "Reportar sello: venía roto");
    assert_eq!(reports[0].order_id, None);
    let sent = h.replies(PHONE).await;
    assert_eq!(sent[sent.len() - 2], replies::SEAL_REPORT_RECEIVED);
    assert_eq!(sent[sent.len() - 1], replies::ASK_SEAL_PHOTO);

    h.send(PHONE, "si").await.unwrap();
    assert_eq!(h.state(PHONE).await, "RECIBIENDO_FOTO_SELLO");
    assert_eq!(h.storage.seal_reports().await[0].photo, PhotoStatus::Requested);

    h.send(PHONE, "[imagen]").await.unwrap();
    assert_eq!(h.state(PHONE).await, "INICIO");
    assert_eq!(h.storage.seal_reports().await[0].photo, PhotoStatus::Received);
}

#[tokio::test]
async fn seal_keyword_from_unknown_phone_creates_customer() {
    let h = Harness::new();
    h.send(PHONE, "REPORTAR SELLO").await.unwrap();

    assert_eq!(h.state(PHONE).await, "ESPERANDO_FOTO_SELLO");
    assert_eq!(h.storage.seal_reports().await.len(), 1);

    h.send(PHONE, "no").await.unwrap();
    assert_eq!(h.state(PHONE).await, "ESPERANDO_NOMBRE_NUEVO");
    let sent = h.replies(PHONE).await;
    assert_eq!(sent[sent.len() - 2], replies::SEAL_REPORT_WITHOUT_PHOTO);
    assert_eq!(sent[sent.len() - 1], replies::REGISTRATION);
}

#[tokio::test]
async fn customer_created_by_seal_report_registers_before_ordering() {
    let h = Harness::new();
    h.script(PHONE, &["REPORTAR SELLO", "si", "[image]"]).await;
    assert_eq!(h.state(PHONE).await, "ESPERANDO_NOMBRE_NUEVO");
    assert!(!h.customer(PHONE).await.is_registered());

    h.send(PHONE, "Pérez López Juan").await.unwrap();
    assert_eq!(h.state(PHONE).await, "ESPERANDO_TIPO_SERVICIO");
    let customer = h.customer(PHONE).await;
    assert_eq!(customer.given_name, "Juan");
    assert_eq!(customer.paternal_surname, "Pérez");

    h.script(PHONE, TO_FINAL_CONFIRM).await;
    h.send(PHONE, "si").await.unwrap();
    let orders = h.storage.orders().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].customer_id, customer.id);
}

#[tokio::test]
async fn unregistered_customer_choosing_new_order_is_asked_for_name() {
    let h = Harness::new();
    let mut customer = fixtures::registered_customer(1, PHONE, "INICIO");
    customer.given_name.clear();
    customer.paternal_surname.clear();
    customer.maternal_surname.clear();
    h.storage.put_customer(customer).await;

    h.script(PHONE, &["hola", "1"]).await;
    assert_eq!(h.state(PHONE).await, "ESPERANDO_NOMBRE_NUEVO");
    assert_eq!(h.last_reply(PHONE).await, replies::REGISTRATION);
    assert!(!h.has_draft(PHONE).await);
}

#[tokio::test]
async fn seal_report_links_last_order() {
    let h = Harness::new();
    h.register(PHONE).await;
    h.script(PHONE, TO_FINAL_CONFIRM).await;
    h.send(PHONE, "si").await.unwrap();

    h.send(PHONE, "reportar sello").await.unwrap();
    assert_eq!(h.storage.seal_reports().await[0].order_id, Some(1));
}

#[tokio::test]
async fn blocked_customer_is_rejected() {
    let h = Harness::new();
    let mut customer = fixtures::registered_customer(1, PHONE, "INICIO");
    customer.blocked = true;
    customer.strikes = 3;
    h.storage.put_customer(customer).await;

    h.send(PHONE, "hola").await.unwrap();

    assert_eq!(h.replies(PHONE).await, vec![replies::BLOCKED.to_string()]);
    assert_eq!(h.state(PHONE).await, "INICIO");
}

#[tokio::test]
async fn repeat_order_uses_current_price() {
    let h = Harness::new();
    h.storage
        .put_customer(fixtures::registered_customer(1, PHONE, "INICIO"))
        .await;
    h.storage
        .create_order(&fixtures::tank_order(1, 100.0, 10.0))
        .await
        .unwrap();

    h.send(PHONE, "hola").await.unwrap();
    let menu = h.last_reply(PHONE).await;
    assert!(menu.contains("Tu pedido será igual que el anterior"), "{menu}");
    assert!(menu.contains("$1250.00"), "{menu}");

    h.send(PHONE, "1").await.unwrap();
    let orders = h.storage.orders().await;
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].liters, 100.0);
    assert_eq!(orders[1].unit_price, 12.5);
    assert_eq!(orders[1].amount, 1250.0);
    assert_eq!(orders[1].address, "Calle X");
    assert_eq!(h.state(PHONE).await, "INICIO");
    assert!(h.last_reply(PHONE).await.contains("repetición"));
}

#[tokio::test]
async fn cancelled_last_order_is_not_offered_for_repeat() {
    let h = Harness::new();
    let customer = fixtures::registered_customer(1, PHONE, "INICIO");
    h.storage.put_customer(customer.clone()).await;
    let order = h
        .storage
        .create_order(&fixtures::tank_order(1, 100.0, 10.0))
        .await
        .unwrap();
    h.storage
        .update_order_status(order.id, OrderStatus::Cancelled)
        .await
        .unwrap();

    h.send(PHONE, "hola").await.unwrap();
    assert_eq!(h.last_reply(PHONE).await, replies::option_menu(&customer, None));

    h.send(PHONE, "repetir").await.unwrap();
    assert_eq!(h.state(PHONE).await, "ESPERANDO_OPCION_INICIAL");
    assert_eq!(h.last_reply(PHONE).await, replies::invalid_option(2));

    h.send(PHONE, "1").await.unwrap();
    assert_eq!(h.state(PHONE).await, "ESPERANDO_TIPO_SERVICIO");
    assert_eq!(h.storage.orders().await.len(), 1);
}

#[tokio::test]
async fn profile_update_returns_to_menu() {
    let h = Harness::new();
    h.storage
        .put_customer(fixtures::registered_customer(1, PHONE, "INICIO"))
        .await;

    h.script(PHONE, &["hola", "2"]).await;
    assert_eq!(h.state(PHONE).await, "ESPERANDO_NOMBRE_NUEVO");
    assert_eq!(h.last_reply(PHONE).await, replies::ASK_NAME);

    h.send(PHONE, "Gómez Ana").await.unwrap();
    let customer = h.customer(PHONE).await;
    assert_eq!(customer.paternal_surname, "Gómez");
    assert_eq!(customer.maternal_surname, "");
    assert_eq!(customer.given_name, "Ana");
    assert_eq!(customer.conversation_state, "ESPERANDO_OPCION_INICIAL");
    assert!(h.replies(PHONE).await.contains(&replies::PROFILE_UPDATED.to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_phones_keep_independent_drafts() {
    let h = Harness::new();
    let first = async {
        h.register("5210000001").await;
        h.script("5210000001", &["tanque", "1", "150", "efectivo", "Calle A", "si", "si"])
            .await;
    };
    let second = async {
        h.register("5210000002").await;
        h.script("5210000002", &["tanque", "2", "500", "tarjeta", "Calle B", "si", "si"])
            .await;
    };
    tokio::join!(first, second);

    let orders = h.storage.orders().await;
    assert_eq!(orders.len(), 2);
    let a = orders.iter().find(|o| o.address == "Calle A").unwrap();
    let b = orders.iter().find(|o| o.address == "Calle B").unwrap();
    assert_eq!(a.liters, 150.0);
    assert_eq!(a.payment, PaymentMethod::Cash);
    assert_eq!(b.amount, 500.0);
    assert_eq!(b.payment, PaymentMethod::Card);
    assert_ne!(a.customer_id, b.customer_id);
}
