//! HTML rendering of the landing page from a message catalog.
//!
//! Markup is intentionally plain: one `<section>` per block of the site,
//! every visible string coming from the catalog. Catalog text is escaped
//! before it reaches the page.

use crate::contact::{ContactForm, ContactFormState, FormStatus, GroupType, SUCCESS_DISPLAY_WINDOW};
use crate::i18n::{Catalog, LocaleRegistry};
use crate::routing::switch_locale_path;
use chrono::{Datelike, Utc};
use std::fmt::Write;

/// Legal documents linked from the footer (slug, catalog key).
const LEGAL_DOCUMENTS: [(&str, &str); 4] = [
    ("aviso-legal", "footer.legal.legalNotice"),
    ("politica-privacidad", "footer.legal.privacy"),
    ("politica-cookies", "footer.legal.cookies"),
    ("terminos-condiciones", "footer.legal.terms"),
];

const ABOUT_FEATURES: [&str; 4] = ["humanExperience", "innovation", "methodology", "playfulSoul"];

const WHY_US_STATS: [&str; 4] = ["projects", "participants", "satisfaction", "repeatClients"];

/// Sections of the landing page that can be linked to as paths
/// (`/ca/contact` renders the landing page).
pub const SECTIONS: [&str; 7] = [
    "hero",
    "about",
    "services",
    "why-us",
    "mission-vision",
    "testimonials",
    "contact",
];

/// Whether a locale-relative path renders the landing page.
pub fn is_page_remainder(remainder: &str) -> bool {
    let section = remainder.trim_matches('/');
    section.is_empty() || SECTIONS.contains(&section)
}

/// Everything a page needs to render.
pub struct PageContext<'a> {
    pub registry: &'a LocaleRegistry,
    pub catalog: &'a Catalog,
    /// Path without the locale segment, used by the language selector
    pub remainder: &'a str,
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render the landing page.
pub fn render_home(ctx: &PageContext<'_>) -> String {
    render_home_with_form(ctx, &ContactFormState::default())
}

/// Render the landing page with the contact form in the given state: the
/// inline error and the entered values after a failed submission, the
/// success message and an empty form after a successful one.
pub fn render_home_with_form(ctx: &PageContext<'_>, form: &ContactFormState) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));

    let mut body = String::new();
    body.push_str(&render_header(ctx));
    body.push_str("<main>\n");
    let _ = write!(
        body,
        "<section id=\"hero\"><h1>{}</h1><p>{}</p><a href=\"#contact\">{}</a></section>\n",
        t("hero.title"),
        t("hero.subtitle"),
        t("hero.cta")
    );
    body.push_str(&render_about(ctx));
    body.push_str(&render_services(ctx));
    body.push_str(&render_why_us(ctx));
    let _ = write!(
        body,
        "<section id=\"mission-vision\"><h2>{}</h2><p>{}</p><h2>{}</h2><p>{}</p></section>\n",
        t("missionVision.mission.title"),
        t("missionVision.mission.text"),
        t("missionVision.vision.title"),
        t("missionVision.vision.text")
    );
    body.push_str(&render_testimonials(ctx));
    body.push_str(&render_contact(ctx, form));
    body.push_str(&render_legal(ctx));
    body.push_str("</main>\n");
    body.push_str(&render_footer(ctx));

    // Drop the success message once it has been up for the display window
    let head = match form.status() {
        FormStatus::Submitted { .. } => format!(
            "<meta http-equiv=\"refresh\" content=\"{};url={}#contact\">\n",
            SUCCESS_DISPLAY_WINDOW.as_secs(),
            escape_html(&switch_locale_path(ctx.remainder, ctx.catalog.locale()))
        ),
        _ => String::new(),
    };

    layout(ctx, &t("meta.title"), &t("meta.description"), &head, &body)
}

/// Render the localized not-found page.
pub fn render_not_found(ctx: &PageContext<'_>) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let body = format!(
        "<main><section id=\"not-found\"><h1>{}</h1><p>{}</p><a href=\"/{}\">{}</a></section></main>\n",
        t("notFound.title"),
        t("notFound.message"),
        ctx.catalog.locale(),
        t("notFound.back")
    );
    layout(ctx, &t("notFound.title"), &t("meta.description"), "", &body)
}

fn layout(ctx: &PageContext<'_>, title: &str, description: &str, head: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<meta name=\"description\" content=\"{}\">\n{}</head>\n<body>\n{}</body>\n</html>\n",
        ctx.catalog.locale(),
        title,
        description,
        head,
        body
    )
}

fn render_header(ctx: &PageContext<'_>) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let mut html = String::from("<header>\n<nav>");
    for (anchor, key) in [
        ("hero", "nav.home"),
        ("about", "nav.about"),
        ("services", "nav.services"),
        ("why-us", "nav.whyUs"),
        ("contact", "nav.contact"),
    ] {
        let _ = write!(html, "<a href=\"#{}\">{}</a>", anchor, t(key));
    }
    html.push_str("</nav>\n");
    html.push_str(&render_language_selector(ctx));
    html.push_str("</header>\n");
    html
}

/// Links to the current page in every registered locale.
pub fn render_language_selector(ctx: &PageContext<'_>) -> String {
    let current = ctx.catalog.locale();
    let mut html = format!(
        "<div class=\"language-selector\" aria-label=\"{}\">",
        escape_html(&ctx.catalog.text("languageSelector.label"))
    );
    for config in ctx.registry.configs() {
        let Some(locale) = ctx.registry.locale(config.code) else {
            continue;
        };
        let current_attr = if locale == current {
            " aria-current=\"true\""
        } else {
            ""
        };
        let _ = write!(
            html,
            "<a href=\"{}\" hreflang=\"{}\" title=\"{}\"{}>{}</a>",
            escape_html(&switch_locale_path(ctx.remainder, locale)),
            locale,
            escape_html(config.native_name),
            current_attr,
            escape_html(config.name)
        );
    }
    html.push_str("</div>\n");
    html
}

fn render_about(ctx: &PageContext<'_>) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let mut html = format!(
        "<section id=\"about\"><h2>{} <strong>{}</strong> {}</h2>",
        t("about.title"),
        t("about.titleHighlight"),
        t("about.titleEnd")
    );
    for key in ["about.description1", "about.description2", "about.description3"] {
        let _ = write!(html, "<p>{}</p>", t(key));
    }
    html.push_str("<ul>");
    for feature in ABOUT_FEATURES {
        let _ = write!(
            html,
            "<li><h3>{}</h3><p>{}</p></li>",
            t(&format!("about.features.{}.title", feature)),
            t(&format!("about.features.{}.description", feature))
        );
    }
    html.push_str("</ul></section>\n");
    html
}

fn render_services(ctx: &PageContext<'_>) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let mut html = format!(
        "<section id=\"services\"><h2>{} <strong>{}</strong></h2><p>{}</p>",
        t("services.title"),
        t("services.titleHighlight"),
        t("services.subtitle")
    );
    for group in ["corporate", "private"] {
        let _ = write!(
            html,
            "<article><h3>{}</h3><h4>{}</h4><p>{}</p><p>{}</p>{}</article>",
            t(&format!("services.{}.title", group)),
            t(&format!("services.{}.subtitle", group)),
            t(&format!("services.{}.description", group)),
            t("services.examples"),
            render_list(ctx.catalog, &format!("services.{}.examples", group))
        );
    }
    let _ = write!(
        html,
        "<h3>{}</h3>{}",
        t("services.features.title"),
        render_list(ctx.catalog, "services.features.list")
    );
    let _ = write!(html, "<h3>{}</h3><ol>", t("services.methodology.title"));
    for index in 0.. {
        let title_key = format!("services.methodology.steps.{}.title", index);
        if !ctx.catalog.contains(&title_key) {
            break;
        }
        let _ = write!(
            html,
            "<li><strong>{}</strong> {}</li>",
            t(&title_key),
            t(&format!("services.methodology.steps.{}.description", index))
        );
    }
    html.push_str("</ol>");
    let _ = write!(
        html,
        "<aside><h3>{}</h3><p>{}</p><a href=\"#contact\">{}</a></aside></section>\n",
        t("services.specialMoments.title"),
        t("services.specialMoments.description"),
        t("services.specialMoments.cta")
    );
    html
}

fn render_why_us(ctx: &PageContext<'_>) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let mut html = format!(
        "<section id=\"why-us\"><h2>{} <strong>{}</strong></h2><p>{}</p><dl>",
        t("whyUs.title"),
        t("whyUs.titleHighlight"),
        t("whyUs.subtitle")
    );
    for stat in WHY_US_STATS {
        let _ = write!(
            html,
            "<dt>{}</dt><dd>{}</dd>",
            t(&format!("whyUs.statValues.{}", stat)),
            t(&format!("whyUs.stats.{}", stat))
        );
    }
    let _ = write!(
        html,
        "</dl><h3>{}</h3>{}</section>\n",
        t("forTeams.title"),
        render_list(ctx.catalog, "forTeams.items")
    );
    html
}

fn render_testimonials(ctx: &PageContext<'_>) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let mut html = format!(
        "<section id=\"testimonials\"><h2>{}</h2><p>{}</p>",
        t("testimonials.title"),
        t("testimonials.subtitle")
    );
    for index in 0.. {
        let quote_key = format!("testimonials.items.{}.quote", index);
        if !ctx.catalog.contains(&quote_key) {
            break;
        }
        let _ = write!(
            html,
            "<blockquote><p>{}</p><footer>{}, {}</footer></blockquote>",
            t(&quote_key),
            t(&format!("testimonials.items.{}.author", index)),
            t(&format!("testimonials.items.{}.role", index))
        );
    }
    html.push_str("</section>\n");
    html
}

fn render_contact(ctx: &PageContext<'_>, form: &ContactFormState) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let locale = ctx.catalog.locale();

    let empty = ContactForm::default();
    let (fields, notice) = match form.status() {
        FormStatus::Submitted { .. } => (
            &empty,
            format!(
                "<p class=\"form-success\" role=\"status\">{}</p>",
                t("contact.form.successMessage")
            ),
        ),
        _ => (
            &form.fields,
            form.error()
                .map(|error| format!("<p class=\"form-error\" role=\"alert\">{}</p>", escape_html(error)))
                .unwrap_or_default(),
        ),
    };

    let mut options = format!("<option value=\"\">{}</option>", t("contact.form.groupTypePlaceholder"));
    for group in GroupType::ALL {
        let selected = if fields.group_type == group.value() {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            options,
            "<option value=\"{}\"{}>{}</option>",
            group.value(),
            selected,
            t(&group.label_key())
        );
    }

    let input = |name: &str, kind: &str, value: &str, required: bool| {
        format!(
            "<label>{}{}<input type=\"{}\" name=\"{}\" value=\"{}\" placeholder=\"{}\"{}></label>",
            t(&format!("contact.form.{}", name)),
            if required { " *" } else { "" },
            kind,
            name,
            escape_html(value),
            t(&format!("contact.form.{}Placeholder", name)),
            if required { " required" } else { "" }
        )
    };

    let mut html = format!(
        "<section id=\"contact\"><h2>{}</h2><p>{}</p>",
        t("contact.title"),
        t("contact.subtitle")
    );
    let _ = write!(
        html,
        "<form method=\"post\" action=\"/api/contact?locale={}\"><h3>{}</h3>{}{}{}{}\
         <label>{}<select name=\"groupType\">{}</select></label>{}\
         <label>{}<input type=\"date\" name=\"date\" value=\"{}\"></label>\
         <label>{}<textarea name=\"message\" rows=\"4\" placeholder=\"{}\">{}</textarea></label>\
         <button type=\"submit\">{}</button><p>* {}</p></form>",
        locale,
        t("contact.form.title"),
        notice,
        input("name", "text", &fields.name, true),
        input("email", "email", &fields.email, true),
        input("phone", "tel", &fields.phone, false),
        t("contact.form.groupType"),
        options,
        input("participants", "text", &fields.participants, false),
        t("contact.form.date"),
        escape_html(&fields.date),
        t("contact.form.message"),
        t("contact.form.messagePlaceholder"),
        escape_html(&fields.message),
        t("contact.form.submit"),
        t("contact.form.responseMessage")
    );
    let _ = write!(
        html,
        "<address><p>{}: hola@colmena-experience.com ({})</p><p>{}: +34 623 286 976 ({})</p><p>{} ({})</p></address>",
        t("contact.info.email"),
        t("contact.info.responseValue"),
        t("contact.info.phone"),
        t("contact.info.hoursValue"),
        t("contact.info.location"),
        t("contact.info.coverage")
    );
    let _ = write!(
        html,
        "<h3>{}</h3>{}",
        t("contact.process.title"),
        render_list(ctx.catalog, "contact.process.steps")
    );
    let _ = write!(
        html,
        "<h3>{}</h3><p>{}</p><ul><li>{}</li><li>{}</li><li>{}</li></ul><p><em>{}</em></p></section>\n",
        t("contact.pricing.title"),
        t("contact.pricing.description"),
        t("contact.pricing.basic"),
        t("contact.pricing.premium"),
        t("contact.pricing.custom"),
        t("contact.pricing.disclaimer")
    );
    html
}

/// One short section per legal document, the footer links' targets.
fn render_legal(ctx: &PageContext<'_>) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let mut html = String::new();
    for (slug, key) in LEGAL_DOCUMENTS {
        let _ = write!(
            html,
            "<section id=\"{}\" class=\"legal\"><h2>{}</h2><p>{}</p></section>\n",
            slug,
            t(key),
            t("footer.legalInquiry")
        );
    }
    html
}

fn render_footer(ctx: &PageContext<'_>) -> String {
    let t = |key: &str| escape_html(&ctx.catalog.text(key));
    let year = Utc::now().year().to_string();

    let mut html = format!("<footer>\n<p>{}</p><nav>", t("footer.tagline"));
    for (slug, key) in LEGAL_DOCUMENTS {
        let _ = write!(html, "<a href=\"#{}\" data-document=\"{}\">{}</a>", slug, slug, t(key));
    }
    let _ = write!(
        html,
        "</nav><p>{}</p>\n</footer>\n",
        escape_html(&ctx.catalog.format("footer.copyright", &[("year", year.as_str())]))
    );
    html
}

fn render_list(catalog: &Catalog, prefix: &str) -> String {
    let mut html = String::from("<ul>");
    for item in catalog.list(prefix) {
        let _ = write!(html, "<li>{}</li>", escape_html(item));
    }
    html.push_str("</ul>");
    html
}
