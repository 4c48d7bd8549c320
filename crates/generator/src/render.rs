use instapage_core::{PreviewRenderer, Product, TEASER_CHARS, WebsiteData, is_hex_color};

use crate::escape::html_escape;
use crate::style::{BODY_FONT, StyleBundle};

/// Scroll offset in pixels after which the back-to-top button shows
pub const GO_TOP_THRESHOLD: u32 = 200;

const ELLIPSIS: &str = "...";
const DEFAULT_PRIMARY: &str = "#1c1917";
const DEFAULT_ACCENT: &str = "#ffffff";

const FONT_STYLESHEET: &str = "https://fonts.googleapis.com/css2?family=Plus+Jakarta+Sans:wght@400;500;600;700;800&family=Playfair+Display:ital,wght@0,400;0,700;1,400&family=Inter:wght@400;500;600&display=swap";
const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// [`PreviewRenderer`] backed by [`render`]
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl PreviewRenderer for HtmlRenderer {
    fn render(&self, data: &WebsiteData) -> String {
        render(data)
    }
}

/// Shorten `text` for the hero section
///
/// Text within the budget is returned unchanged. Longer text is cut on a
/// character boundary and ends with `...`, always staying shorter than the
/// original.
pub fn teaser(text: &str) -> String {
    if text.chars().count() <= TEASER_CHARS {
        return text.to_string();
    }
    let keep = TEASER_CHARS - ELLIPSIS.len();
    let cut = text
        .char_indices()
        .nth(keep)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    format!("{}{}", text[..cut].trim_end(), ELLIPSIS)
}

/// WhatsApp number reduced to the digits wa.me accepts
fn whatsapp_digits(number: &str) -> String {
    number.chars().filter(char::is_ascii_digit).collect()
}

/// wa.me deep link, optionally with a prefilled message
fn whatsapp_link(number: &str, message: Option<&str>) -> String {
    let base = format!("https://wa.me/{}", whatsapp_digits(number));
    match message {
        Some(text) => format!("{}?text={}", base, urlencoding::encode(text)),
        None => base,
    }
}

fn css_color<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if is_hex_color(value) { value } else { fallback }
}

/// Generate the complete HTML document for a site
///
/// The output depends only on `data`: calling this twice with the same
/// input yields byte-identical documents. Every piece of user text is
/// HTML-escaped; image references are inserted as given.
pub fn render(data: &WebsiteData) -> String {
    let style = StyleBundle::for_template(&data.template);
    let show_products = data.products_visible();

    let title = html_escape(&data.title);
    let business_name = html_escape(&data.business_name);
    let logo_url = html_escape(&data.logo_url);
    let hero_image = html_escape(&data.hero_image);
    let headline = html_escape(&data.about_headline);
    let about_teaser = html_escape(&teaser(&data.about_text));
    let about_text = html_escape(&data.about_text);
    let email = html_escape(&data.email);
    let phone = html_escape(&data.phone);
    let address = html_escape(&data.address);
    let whatsapp = html_escape(&whatsapp_link(&data.whatsapp, None));

    let primary = css_color(&data.primary_color, DEFAULT_PRIMARY);
    let accent = css_color(&data.accent_color, DEFAULT_ACCENT);
    let font_size = data.font_size();

    let heading_font = style.heading_font;
    let heading_treatment = style.heading_treatment;
    let page_classes = style.page;
    let nav_classes = style.nav;
    let hero_classes = style.hero;
    let offerings = style.offerings_label;
    let (copy_order, image_order) = if style.image_first {
        ("order-2 md:order-1", "order-1 md:order-2")
    } else {
        ("", "")
    };

    let products_nav = if show_products {
        format!(r##"<a href="#products" class="nav-link transition-colors">{offerings}</a>"##)
    } else {
        String::new()
    };

    let products_cta = if show_products {
        r##"<a href="#products" class="px-10 py-5 rounded-full font-bold text-sm uppercase tracking-widest shadow-2xl hover:scale-105 transition-all" style="background-color: var(--primary); color: white;">View Services</a>"##
    } else {
        ""
    };

    let products_section = if show_products {
        products_section(data, &style)
    } else {
        String::new()
    };

    let script = page_script();

    let html = format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{TAILWIND_CDN}"></script>
    <link href="{FONT_STYLESHEET}" rel="stylesheet">
    <style>
        :root {{
          --base-font-size: {font_size}px;
          --primary: {primary};
          --accent: {accent};
        }}
        html {{ font-size: var(--base-font-size); scroll-behavior: smooth; }}
        body {{ font-family: {BODY_FONT}; }}
        h1, h2, h3, h4 {{ font-family: {heading_font}; }}
        .primary-text {{ color: var(--primary); }}
        .primary-bg {{ background-color: var(--primary); }}
        .accent-text {{ color: var(--accent); }}
        .accent-bg {{ background-color: var(--accent); }}
        .nav-link:hover {{ opacity: 0.7; }}

        #go-top {{
          opacity: 0;
          visibility: hidden;
          transition: all 0.4s cubic-bezier(0.4, 0, 0.2, 1);
          transform: translateY(20px);
        }}
        #go-top.show {{
          opacity: 1;
          visibility: visible;
          transform: translateY(0);
        }}
        {heading_treatment}
    </style>
</head>
<body class="{page_classes} relative">
    <div id="home" class="absolute top-0 left-0 w-px h-px pointer-events-none"></div>

    <header id="top-nav" class="fixed top-0 w-full z-40 transition-all duration-300 {nav_classes}">
        <div class="max-w-7xl mx-auto px-6 h-24 flex items-center justify-between">
            <div class="flex items-center gap-4">
                <img src="{logo_url}" alt="Logo" class="w-12 h-12 rounded-full object-cover">
                <span class="text-2xl font-bold tracking-tight text-stone-900">{business_name}</span>
            </div>
            <nav class="hidden md:flex gap-10 text-stone-600 font-semibold text-sm uppercase tracking-widest">
                <a href="#about" class="nav-link transition-colors">About</a>
                {products_nav}
                <a href="#contact" class="nav-link transition-colors">Contact</a>
            </nav>
            <a href="{whatsapp}" target="_blank" rel="noopener noreferrer" class="px-8 py-3 rounded-full text-sm font-bold uppercase tracking-widest shadow-lg hover:opacity-90 transition-all" style="background-color: var(--primary); color: white;">Get Started</a>
        </div>
    </header>

    <section class="pt-48 pb-24 px-6 {hero_classes}">
        <div class="max-w-7xl mx-auto grid md:grid-cols-2 gap-16 items-center">
            <div class="{copy_order}">
                <span class="inline-block mb-4 text-sm font-bold uppercase tracking-[0.3em] opacity-60" style="color: var(--primary)">Welcome</span>
                <h1 class="text-6xl md:text-8xl font-bold mb-8 leading-[1.1] text-stone-900">{headline}</h1>
                <p class="hero-teaser text-xl mb-10 text-stone-600 leading-relaxed max-w-lg">{about_teaser}</p>
                <div class="flex flex-wrap gap-6">
                    {products_cta}
                    <a href="#about" class="px-10 py-5 rounded-full font-bold text-sm uppercase tracking-widest border-2 hover:bg-stone-50 transition-all" style="border-color: var(--primary); color: var(--primary);">My Story</a>
                </div>
            </div>
            <div class="relative {image_order}">
                <div class="absolute -top-10 -left-10 w-40 h-40 rounded-full opacity-20 blur-3xl" style="background-color: var(--primary)"></div>
                <div class="absolute -bottom-10 -right-10 w-60 h-60 rounded-full opacity-10 blur-3xl" style="background-color: var(--primary)"></div>
                <div class="relative rounded-[4rem] overflow-hidden shadow-2xl aspect-[4/5] md:aspect-square">
                  <img src="{hero_image}" alt="Hero" class="w-full h-full object-cover">
                </div>
            </div>
        </div>
    </section>

    <section id="about" class="py-32 px-6 bg-[#faf9f6]">
        <div class="max-w-5xl mx-auto flex flex-col items-center text-center">
            <span class="inline-block mb-6 text-sm font-bold uppercase tracking-[0.3em] opacity-60" style="color: var(--primary)">The Journey</span>
            <h2 class="text-5xl font-bold mb-12 text-stone-900 italic">"Focus on progress, not perfection."</h2>
            <div class="w-24 h-1 mb-12" style="background-color: var(--primary)"></div>
            <p class="about-text text-xl md:text-2xl text-stone-600 leading-loose max-w-4xl">{about_text}</p>
        </div>
    </section>
{products_section}
    <section id="contact" class="py-32 px-6 bg-stone-900 text-white overflow-hidden relative">
        <div class="absolute top-0 right-0 w-1/2 h-full opacity-5 pointer-events-none">
          <svg viewBox="0 0 100 100" preserveAspectRatio="none" class="h-full w-full"><path d="M0 100 C 20 0 50 0 100 100 Z" fill="white"></path></svg>
        </div>
        <div class="max-w-7xl mx-auto relative z-10">
            <div class="max-w-4xl mx-auto text-center">
                <span class="inline-block mb-4 text-sm font-bold uppercase tracking-[0.3em] opacity-40">Let's Connect</span>
                <h2 class="text-5xl md:text-6xl font-bold mb-16">Contact Information</h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-16 text-center">
                    <div class="flex flex-col items-center group">
                        <div class="w-20 h-20 rounded-full bg-white/5 flex items-center justify-center mb-8 group-hover:bg-white/10 transition-colors">
                            <svg class="w-10 h-10 text-stone-400" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="1.5" d="M3 8l7.89 5.26a2 2 0 002.22 0L21 8M5 19h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v10a2 2 0 002 2z"></path></svg>
                        </div>
                        <p class="text-xs font-bold uppercase tracking-widest text-stone-500 mb-3">Email Us</p>
                        <a href="mailto:{email}" class="text-xl font-medium hover:text-stone-300 transition-colors break-all">{email}</a>
                    </div>
                    <div class="flex flex-col items-center group">
                        <div class="w-20 h-20 rounded-full bg-white/5 flex items-center justify-center mb-8 group-hover:bg-white/10 transition-colors">
                            <svg class="w-10 h-10 text-stone-400" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="1.5" d="M3 5a2 2 0 012-2h3.28a1 1 0 01.948.684l1.498 4.493a1 1 0 01-.502 1.21l-2.257 1.13a11.042 11.042 0 005.516 5.516l1.13-2.257a1 1 0 011.21-.502l4.493 1.498a1 1 0 01.684.949V19a2 2 0 01-2 2h-1C9.716 21 3 14.284 3 6V5z"></path></svg>
                        </div>
                        <p class="text-xs font-bold uppercase tracking-widest text-stone-500 mb-3">Call Us</p>
                        <a href="tel:{phone}" class="text-xl font-medium hover:text-stone-300 transition-colors">{phone}</a>
                    </div>
                    <div class="flex flex-col items-center group">
                        <div class="w-20 h-20 rounded-full bg-white/5 flex items-center justify-center mb-8 group-hover:bg-white/10 transition-colors">
                            <svg class="w-10 h-10 text-stone-400" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="1.5" d="M17.657 16.657L13.414 20.9a1.998 1.998 0 01-2.827 0l-4.244-4.243a8 8 0 1111.314 0z"></path><path stroke-linecap="round" stroke-linejoin="round" stroke-width="1.5" d="M15 11a3 3 0 11-6 0 3 3 0 016 0z"></path></svg>
                        </div>
                        <p class="text-xs font-bold uppercase tracking-widest text-stone-500 mb-3">Our Location</p>
                        <span class="text-xl font-medium">{address}</span>
                    </div>
                </div>
            </div>
        </div>
    </section>

    <footer class="py-16 px-6 text-center text-stone-400 bg-stone-50">
        <div class="max-w-7xl mx-auto">
          <img src="{logo_url}" alt="Logo" class="w-16 h-16 rounded-full object-cover mx-auto mb-6 opacity-50 grayscale">
          <p class="text-sm font-medium uppercase tracking-widest mb-2">{business_name}</p>
          <p class="text-xs">&copy; {business_name}. All rights reserved.</p>
        </div>
    </footer>

    <div class="fixed bottom-8 right-8 flex flex-col gap-4 z-[100]">
      <a href="#home" id="go-top" title="Go to Home" class="w-14 h-14 bg-white shadow-2xl rounded-full flex items-center justify-center text-stone-900 border border-stone-100 hover:scale-110 active:scale-95 transition-all cursor-pointer">
        <svg class="w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 12l2-2m0 0l7-7 7 7M5 10v10a1 1 0 001 1h3m10-11l2 2m-2-2v10a1 1 0 01-1 1h-3m-6 0a1 1 0 001-1v-4a1 1 0 011-1h2a1 1 0 011 1v4a1 1 0 001 1m-6 0h6"></path></svg>
      </a>
      <a href="{whatsapp}" target="_blank" rel="noopener noreferrer" title="WhatsApp Us" class="w-14 h-14 bg-[#25D366] text-white shadow-2xl rounded-full flex items-center justify-center hover:scale-110 active:scale-95 transition-all">
        <svg class="w-8 h-8" fill="currentColor" viewBox="0 0 24 24"><path d="M17.472 14.382c-.297-.149-1.758-.867-2.03-.967-.273-.099-.471-.148-.67.15-.197.297-.767.966-.94 1.164-.173.199-.347.223-.644.075-.297-.15-1.255-.463-2.39-1.475-.883-.788-1.48-1.761-1.653-2.059-.173-.297-.018-.458.13-.606.134-.133.298-.347.446-.52.149-.174.198-.298.298-.497.099-.198.05-.371-.025-.52-.075-.149-.669-1.612-.916-2.207-.242-.579-.487-.5-.669-.51-.173-.008-.371-.01-.57-.01-.198 0-.52.074-.792.372-.272.297-1.04 1.016-1.04 2.479 0 1.462 1.065 2.875 1.213 3.074.149.198 2.096 3.2 5.077 4.487.709.306 1.262.489 1.694.625.712.227 1.36.195 1.871.118.571-.085 1.758-.719 2.006-1.413.248-.694.248-1.289.173-1.413-.074-.124-.272-.198-.57-.347m-5.421 7.403h-.004a9.87 9.87 0 01-5.031-1.378l-.361-.214-3.741.982.998-3.648-.235-.374a9.86 9.86 0 01-1.51-5.26c.001-5.45 4.436-9.884 9.888-9.884 2.64 0 5.122 1.03 6.988 2.898a9.825 9.825 0 012.893 6.994c-.003 5.45-4.437 9.884-9.885 9.884m8.413-18.297A11.815 11.815 0 0012.05 0C5.495 0 .16 5.335.157 11.892c0 2.096.547 4.142 1.588 5.945L0 24l6.335-1.662c1.72.94 3.674 1.436 5.662 1.436h.005c6.554 0 11.89-5.335 11.893-11.893a11.821 11.821 0 00-3.48-8.413z"/></svg>
      </a>
    </div>

    <script>
{script}
    </script>
</body>
</html>
"##
    );

    tracing::debug!(
        template = %data.template,
        products = data.products.len(),
        bytes = html.len(),
        "rendered site"
    );

    html
}

fn products_section(data: &WebsiteData, style: &StyleBundle) -> String {
    let cards: String = data
        .products
        .iter()
        .map(|p| product_card(p, data, style))
        .collect();
    let offerings = style.offerings_label;

    format!(
        r##"
    <section id="products" class="py-32 px-6 bg-white">
        <div class="max-w-7xl mx-auto">
            <div class="text-center mb-20">
                <span class="inline-block mb-4 text-sm font-bold uppercase tracking-[0.3em] opacity-60" style="color: var(--primary)">Offerings</span>
                <h2 class="text-5xl font-bold text-stone-900">{offerings}</h2>
            </div>
            <div class="grid sm:grid-cols-2 lg:grid-cols-3 gap-12">
{cards}
            </div>
        </div>
    </section>
"##
    )
}

fn product_card(product: &Product, data: &WebsiteData, style: &StyleBundle) -> String {
    let name = html_escape(&product.name);
    let price = html_escape(&product.price);
    let description = html_escape(&product.description);
    let image_url = html_escape(&product.image_url);
    let enquiry = format!("Hi, I'm interested in {}", product.name);
    let book_link = html_escape(&whatsapp_link(&data.whatsapp, Some(&enquiry)));
    let card_classes = style.card.card_classes();
    let image_filter = style.image_filter;

    format!(
        r##"                <div class="{card_classes}">
                  <div class="overflow-hidden aspect-square">
                    <img src="{image_url}" alt="{name}" class="w-full h-full object-cover transition-transform duration-500 group-hover:scale-110 {image_filter}">
                  </div>
                  <div class="p-8">
                    <h3 class="text-2xl font-bold mb-3 text-stone-900">{name}</h3>
                    <p class="text-stone-600 mb-6 text-sm leading-relaxed">{description}</p>
                    <div class="flex items-center justify-between pt-4 border-t border-stone-50">
                      <span class="text-xl font-bold primary-text">{price}</span>
                      <a href="{book_link}" target="_blank" rel="noopener noreferrer" class="px-6 py-2.5 rounded-full text-sm font-bold transition-all primary-bg" style="color: white; box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1);">Book Now</a>
                    </div>
                  </div>
                </div>
"##
    )
}

/// Smooth scrolling for in-page links and the back-to-top button
fn page_script() -> String {
    format!(
        r##"      document.addEventListener('DOMContentLoaded', () => {{
        document.querySelectorAll('a[href^="#"]').forEach(anchor => {{
          anchor.addEventListener('click', function (e) {{
            const targetId = this.getAttribute('href');
            if (targetId === '#' || this.target === '_blank') return;
            const targetElement = document.querySelector(targetId);
            if (targetElement) {{
              e.preventDefault();
              targetElement.scrollIntoView({{ behavior: 'smooth', block: 'start' }});
              history.pushState(null, null, targetId);
            }}
          }});
        }});

        const goTopBtn = document.getElementById('go-top');
        if (goTopBtn) {{
          window.addEventListener('scroll', () => {{
            if (window.pageYOffset > {GO_TOP_THRESHOLD}) {{
              goTopBtn.classList.add('show');
            }} else {{
              goTopBtn.classList.remove('show');
            }}
          }});
          goTopBtn.addEventListener('click', (e) => {{
            e.preventDefault();
            window.scrollTo({{ top: 0, behavior: 'smooth' }});
          }});
        }}
      }});"##
    )
}

/// Add the preview server's hot reload hook to a rendered page
///
/// Only used by `instapage preview`; exported files never carry it.
pub fn inject_live_reload(html: &str) -> String {
    const RELOAD_SCRIPT: &str = r#"<script>
        // Hot reload via Server-Sent Events
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => {
            console.log('Reloading...');
            location.reload();
        };
        eventSource.onerror = () => {
            console.log('Preview server disconnected');
            eventSource.close();
        };
    </script>
"#;

    match html.rfind("</body>") {
        Some(idx) => {
            let mut out = String::with_capacity(html.len() + RELOAD_SCRIPT.len());
            out.push_str(&html[..idx]);
            out.push_str(RELOAD_SCRIPT);
            out.push_str(&html[idx..]);
            out
        }
        None => format!("{}{}", html, RELOAD_SCRIPT),
    }
}
