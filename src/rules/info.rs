//! Tabla canónica de reglas para `info.html`
//!
//! Una sola tabla ordenada con el número de apariciones explícito por regla.

use crate::error::RuleError;
use crate::rules::{RuleSet, SubstitutionRule};

type RuleResult = Result<SubstitutionRule, RuleError>;

/// `<open>text</close>` → `<open data-i18n="key">text</close>`
fn element(open: &str, key: &str, text: &str, close: &str) -> RuleResult {
    Ok(SubstitutionRule::literal(
        &format!("{open}>{text}{close}"),
        &format!("{open} data-i18n=\"{key}\">{text}{close}"),
    )?
    .with_description(text))
}

fn label(key: &str, text: &str) -> RuleResult {
    element("<label", key, text, "</label>")
}

/// Botón chip identificado por su `data-value`
fn chip(value: &str, key: &str, text: &str) -> RuleResult {
    Ok(SubstitutionRule::literal(
        &format!("data-value=\"{value}\">{text}</button>"),
        &format!("data-value=\"{value}\" data-i18n=\"{key}\">{text}</button>"),
    )?
    .with_description(text))
}

fn placeholder(key: &str, text: &str) -> RuleResult {
    Ok(SubstitutionRule::literal(
        &format!("placeholder=\"{text}\""),
        &format!("data-i18n-placeholder=\"{key}\" placeholder=\"{text}\""),
    )?
    .with_description(text))
}

/// Envuelve en un `<span>` anotado un nodo de texto que sigue al cierre
/// de una etiqueta, nunca texto dentro del valor de un atributo
fn wrap(key: &str, text: &str) -> RuleResult {
    Ok(SubstitutionRule::pattern(
        &format!(r"(>\s*)({})", regex::escape(text)),
        &format!("${{1}}<span data-i18n=\"{key}\">${{2}}</span>"),
    )?
    .with_description(text))
}

fn literal(find: &str, replace: &str, description: &str) -> RuleResult {
    Ok(SubstitutionRule::literal(find, replace)?.with_description(description))
}

fn pattern(find: &str, replace: &str, description: &str) -> RuleResult {
    Ok(SubstitutionRule::pattern(find, replace)?.with_description(description))
}

fn returns_policy() -> Vec<RuleResult> {
    vec![
        label("info.returnsDays", "🗓️ Los clientes disponen de"),
        label("info.days", " días "),
        chip("naturales", "info.naturalDays", "naturales"),
        chip("laborales", "info.businessDays", "laborales"),
        label("info.toReturnProduct", " para devolver un producto"),
        label(
            "info.productState",
            "📦 Estado en el que debe estar el artículo para ser aceptado como devolución",
        ),
        chip("Sin usar", "info.unused", "Sin usar"),
        chip("Con etiqueta", "info.withTag", "Con etiqueta"),
        chip("Embalaje original", "info.originalPackaging", "Embalaje original"),
        chip("Precintado", "info.sealed", "Precintado"),
        label("info.returnCost", "💸 Coste de devolución"),
        chip("cliente", "info.customerPays", "A cargo del cliente"),
        chip("tienda", "info.storePays", "Gratis (lo asume la tienda)"),
        label("info.refundMethod", "↩️ Método de reembolso"),
        pattern(
            r"(<button[^>]*data-na-toggle[^>]*>)\(N/A\)",
            r#"${1}<span data-i18n="info.notApplicable">(N/A)</span>"#,
            "(N/A)",
        ),
        chip("Mismo medio de pago", "info.samePaymentMethod", "Mismo medio de pago"),
        chip("Vale de tienda", "info.storeCredit", "Vale de tienda"),
        chip("Cambio por otro producto", "info.exchangeProduct", "Cambio por otro producto"),
        pattern(
            r"(<button[^>]*chip-other[^>]*data-other[^>]*)>Otro \+</button>",
            r#"${1} data-i18n="info.other">Otro +</button>"#,
            "Otro +",
        ),
        placeholder("info.specifyOther", "Especifica 'Otro'…"),
        label("info.refundTimeframe", "⏱️ Plazo de reembolso"),
        wrap("info.refundTimeText", "Reembolsamos el dinero aproximadamente en"),
        literal(
            r#"name="reembolso_dias" placeholder="7"> días."#,
            r#"name="reembolso_dias" placeholder="7"> <span data-i18n="info.days">días</span>."#,
            "días",
        ),
        label("info.orderCancellation", "🛑 Cuando se puede cancelar un pedido"),
        chip("Si no ha salido del almacén", "info.notLeftWarehouse", "Si no ha salido del almacén"),
        chip("Dentro de X horas", "info.withinHours", "Dentro de las primeras 24 horas"),
        label("info.returnsPolicyLink", "🔗 Enlace a la política de devoluciones"),
        placeholder(
            "info.returnsPolicyLinkPlaceholder",
            "https://tutienda.com/devoluciones (opcional)",
        ),
        element("<h4", "info.fieldsMarkedNA", "Campos marcados como \"No aplican\"", "</h4>"),
        element(
            "<h3 class=\"user-policy-title\"",
            "info.yourCompleteReturnsPolicy",
            "📄 Tu política completa de devoluciones",
            "</h3>",
        ),
        element(
            "<p class=\"policy-note\"",
            "info.policyNote",
            "Pega aquí <strong>únicamente el texto de tu política</strong>. \
             No añadas instrucciones de comportamiento para el bot, serán ignoradas.",
            "</p>",
        ),
        placeholder(
            "info.pasteReturnsPolicyPlaceholder",
            "Pega aquí tu política completa de devoluciones…",
        ),
    ]
}

/// Botón de guardar y spinner de carga, repetidos en cada sección
fn save_and_loading() -> Vec<RuleResult> {
    vec![
        element(
            "<button type=\"submit\" class=\"send-button pf-submit\"",
            "info.save",
            "Guardar",
            "</button>",
        ),
        element("<button class=\"send-button\" id=\"faqSend\"", "info.save", "Guardar", "</button>"),
        element("<p", "info.weAre", "Estamos", "</p>"),
        element("<span class=\"word\"", "info.savingYourInfo", "guardando tu información...", "</span>"),
        element("<span class=\"word\"", "info.validatingFields", "validando campos...", "</span>"),
        element(
            "<span class=\"word\"",
            "info.updatingDatabase",
            "actualizando la base de datos...",
            "</span>",
        ),
        element(
            "<span class=\"word\"",
            "info.preparingConfirmation",
            "preparando confirmación...",
            "</span>",
        ),
    ]
}

/// Aviso de cabecera de devoluciones y envíos
fn notice() -> Vec<RuleResult> {
    vec![
        element("<strong", "info.important", "ℹ️ Importante:", "</strong>"),
        // Una vez en devoluciones y otra en envíos
        pattern(
            r"este formulario recoge la <em>información mínima</em> para que el bot funcione bien\.",
            r#"<span data-i18n="info.formDescription">${0}</span>"#,
            "este formulario recoge la información mínima para que el bot funcione bien.",
        )
        .map(|rule| rule.first(2)),
        pattern(
            r"Debes pegar tu política completa al final del formulario, para que el bot pueda usarla\.",
            r#"<span data-i18n="info.pastePolicyInstructions">${0}</span>"#,
            "Debes pegar tu política completa al final del formulario, para que el bot pueda usarla.",
        )
        .map(|rule| rule.first(2)),
    ]
}

fn shipping_policy() -> Vec<RuleResult> {
    vec![
        element("<h2", "info.shippingPolicy", "Política de Envíos", "</h2>"),
        label("info.rates", "💶 Tarifas"),
        literal(
            "<span>Zona</span><span>Precio</span><span>Tiempo</span><span>Notas</span>",
            "<span data-i18n=\"info.zone\">Zona</span><span data-i18n=\"info.price\">Precio</span>\
             <span data-i18n=\"info.time\">Tiempo</span><span data-i18n=\"info.notes\">Notas</span>",
            "Zona / Precio / Tiempo / Notas",
        ),
        literal(
            "data-add-row>+ Añadir fila</button>",
            "data-add-row data-i18n=\"info.addRow\">+ Añadir fila</button>",
            "+ Añadir fila",
        ),
        label("info.shippingZones", "🗺️ Zonas de envío"),
        chip("Nacional (España)", "info.national", "Nacional (España)"),
        chip("UE", "info.eu", "UE"),
        chip("Internacional", "info.international", "Internacional"),
        pattern(
            r"(<button[^>]*)>País/es concretos \+</button>",
            r#"${1} data-i18n="info.specificCountries">País/es concretos +</button>"#,
            "País/es concretos +",
        ),
        placeholder("info.specifyCountries", "Especifica país/es…"),
        label("info.globalEstimatedTime", "⏱️ Tiempo estimado global"),
        label("info.orderIds", "📬 Identificadores de pedido"),
        wrap("info.trackingProvided", "¿Se proporciona número de seguimiento?"),
        chip("sí", "info.yes", "Sí"),
        chip("no", "info.no", "No"),
        label("info.whenTrackingSent", "🕒 ¿Cuándo se envía el seguimiento?"),
        placeholder(
            "info.whenTrackingSentPlaceholder",
            "Ej. al despachar el pedido / 24h después",
        ),
        label("info.shipmentTracking", "🔎 Seguimiento del envío"),
        chip("Email con enlace", "info.emailWithLink", "Email con enlace"),
        chip("Cuenta de cliente", "info.onWebsite", "En nuestra página web"),
        chip("Enlace del transportista", "info.carrierLink", "Enlace del transportista"),
        placeholder("info.trackingUrlPlaceholder", "URL de seguimiento (opcional)"),
        label("info.shippingPolicyLink", "🔗 Link a política de envíos"),
        placeholder(
            "info.shippingPolicyLinkPlaceholder",
            "https://tutienda.com/envios (opcional)",
        ),
        element(
            "<h3 class=\"user-policy-title\"",
            "info.yourCompleteShippingPolicy",
            "📄 Tu política completa de envíos",
            "</h3>",
        ),
        placeholder(
            "info.pasteShippingPolicyPlaceholder",
            "Pega aquí tu política completa de envíos…",
        ),
    ]
}

fn general_info() -> Vec<RuleResult> {
    vec![
        element("<h2", "info.generalInfo", "Información general de la tienda", "</h2>"),
        element(
            "<p class=\"policy-tip\"",
            "info.generalInfoTip",
            "🧾 Métodos de pago, ubicación, garantías…",
            "</p>",
        ),
        label("info.paymentMethods", "💳 Métodos de pago aceptados"),
        chip("Visa", "info.visa", "Visa"),
        chip("Mastercard", "info.mastercard", "Mastercard"),
        chip("PayPal", "info.paypal", "PayPal"),
        chip("Bizum", "info.bizum", "Bizum"),
        chip("Transferencia", "info.bankTransfer", "Transferencia"),
        chip("Contra reembolso", "info.cashOnDelivery", "Contra reembolso"),
        chip("Apple Pay", "info.applePay", "Apple Pay"),
        chip("Google Pay", "info.googlePay", "Google Pay"),
        label("info.location", "📍 Ubicación"),
        chip("Online", "info.online", "Online"),
        chip("Física", "info.physical", "Física"),
        placeholder("info.storeAddress", "Dirección de la tienda"),
        label("info.addressChange", "🚚 Cambio de dirección tras pedido"),
        wrap(
            "info.addressChangeConditions",
            "¿Bajo qué condiciones el cliente puede cambiar la dirección de envío?\
             ¿Y qué plazo tiene para ello?",
        ),
        placeholder("info.addressChangePlaceholder", "Condiciones / plazo"),
        label("info.sizeChart", "📏 Tabla de tallas"),
        placeholder("info.sizeChartLocation", "Dónde se encuentra?"),
        label("info.warranty", "🛡️ Garantía"),
        chip("Sin garantía", "info.noWarranty", "Sin garantía"),
        chip("Días", "info.warrantyDays", "Días"),
        chip("Meses", "info.warrantyMonths", "Meses"),
        chip("Años", "info.warrantyYears", "Años"),
        wrap("info.duration", "Duración:"),
    ]
}

fn faq_and_sidebar() -> Vec<RuleResult> {
    vec![
        element("<h2", "info.faq", "Preguntas Frecuentes", "</h2>"),
        wrap(
            "info.faqTip",
            "❓ Aquí configuras tus Preguntas Frecuentes. Escribe la \
             <strong>pregunta de forma literal</strong> y una <strong>respuesta exacta</strong> \
             tal y como quieres que la vea el cliente.",
        ),
        element(
            "<h4 style=\"font-weight:600; color:#9CA3AF; margin-bottom:1.5vh;\"",
            "info.notApply",
            "No aplican",
            "</h4>",
        ),
        literal(
            "id=\"faqAdd\">+ Añadir pregunta</button>",
            "id=\"faqAdd\" data-i18n=\"info.addQuestion\">+ Añadir pregunta</button>",
            "+ Añadir pregunta",
        ),
        literal(
            "aria-label=\"Mostrar panel\"",
            "data-i18n-aria-label=\"info.showPanel\" aria-label=\"Mostrar panel\"",
            "Mostrar panel",
        ),
        element("<h3", "info.sidebarTitle", "Propuestas de información a añadir", "</h3>"),
    ]
}

/// Reglas integradas para `site/secciones/info.html`, en orden de aplicación
pub fn builtin_rules() -> Result<RuleSet, RuleError> {
    let rules = returns_policy()
        .into_iter()
        .chain(save_and_loading())
        .chain(notice())
        .chain(shipping_policy())
        .chain(general_info())
        .chain(faq_and_sidebar())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RuleSet::from(rules))
}
