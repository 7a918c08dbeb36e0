//! HTML rendering of the view models.

use crate::card::ProductCard;
use crate::modal::ModalView;
use crate::render::Rendered;

/// Render a product list state to HTML.
pub fn render(rendered: &Rendered) -> String {
    match rendered {
        Rendered::Loading { placeholders } => skeleton_card().repeat(*placeholders),
        Rendered::Empty { message, action } => format!(
            r#"<div class="loading">
    <p>{}</p>
    <a class="whatsapp-btn" href="{}" target="_blank">{}</a>
</div>"#,
            escape_html(message),
            escape_html(&action.link),
            escape_html(&action.label)
        ),
        Rendered::Cards { cards } => cards.iter().map(render_card).collect(),
        Rendered::Failed { message, .. } => format!(
            r#"<div class="loading">
    <div class="loading-spinner"></div>
    <p>{}</p>
</div>"#,
            escape_html(message)
        ),
    }
}

fn render_card(card: &ProductCard) -> String {
    let (src_attr, class) = if card.image.loads_immediately() {
        (
            format!(r#"src="{}""#, escape_html(&card.image.src)),
            "product-image loaded",
        )
    } else {
        (
            format!(
                r#"src="{}" data-src="{}""#,
                escape_html(&card.image.placeholder),
                escape_html(&card.image.src)
            ),
            "product-image skeleton",
        )
    };

    format!(
        r#"<div class="product-card" data-product-id="{id}">
    <div class="product-image-container">
        <img {src_attr} alt="{alt}" class="{class}">
    </div>
    <div class="product-info">
        <div class="product-badge">{badge}</div>
        <h3 class="product-title">{title}</h3>
        <div class="product-price">{price}</div>
        <p class="product-description">{description}</p>
        <button class="whatsapp-btn">Order via WhatsApp</button>
    </div>
</div>"#,
        id = escape_html(&card.product_id),
        src_attr = src_attr,
        alt = escape_html(&card.image.alt),
        class = class,
        badge = escape_html(&card.badge),
        title = escape_html(&card.title),
        price = escape_html(&card.price_label),
        description = escape_html(&card.description),
    )
}

fn skeleton_card() -> &'static str {
    r#"<div class="product-card skeleton">
    <div class="skeleton skeleton-image"></div>
    <div class="product-info">
        <div class="skeleton skeleton-text short"></div>
        <div class="skeleton skeleton-text"></div>
        <div class="skeleton skeleton-text" style="width: 40%;"></div>
        <div class="skeleton skeleton-text" style="height: 40px; margin-top: 10px;"></div>
    </div>
</div>
"#
}

/// Render the modal body.
pub fn render_modal(view: &ModalView) -> String {
    let gallery = if view.thumbnails.is_empty() {
        String::new()
    } else {
        let thumbs: String = view
            .thumbnails
            .iter()
            .map(|t| {
                format!(
                    r#"<div class="gallery-thumbnail{}" data-index="{}"><img src="{}" alt="{}"></div>"#,
                    if t.active { " active" } else { "" },
                    t.index,
                    escape_html(&t.src),
                    escape_html(&t.alt)
                )
            })
            .collect();
        format!(r#"<div class="image-gallery">{}</div>"#, thumbs)
    };

    format!(
        r#"<div class="modal-image-section">
    <div class="modal-image-container">
        <img src="{image}" alt="{title}" class="modal-image{zoomed}">
        <div class="zoom-hint">{hint}</div>
    </div>
    {gallery}
</div>
<div class="modal-details">
    <h2 class="modal-title">{title}</h2>
    <div class="modal-price">{price}</div>
    <div class="modal-category">{badge}</div>
    <p class="modal-description">{description}</p>
    <button class="modal-whatsapp-btn">Order via WhatsApp</button>
</div>"#,
        image = escape_html(&view.primary_image),
        title = escape_html(&view.title),
        zoomed = if view.zoomed { " zoomed" } else { "" },
        hint = view.zoom_hint,
        gallery = gallery,
        price = escape_html(&view.price_label),
        badge = escape_html(&view.badge),
        description = escape_html(&view.description),
    )
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
