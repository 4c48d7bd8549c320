use instapage_core::TemplateId;

const SERIF_HEADING: &str = "'Playfair Display', serif";
const JAKARTA_HEADING: &str = "'Plus Jakarta Sans', sans-serif";
const INTER: &str = "'Inter', sans-serif";

const NAV_DEFAULT: &str = "bg-white/80 backdrop-blur-md shadow-sm";
const NAV_SOFT: &str = "bg-white/90 backdrop-blur-sm border-b border-stone-100";

/// Appearance of a product card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    /// Rounded card with a soft shadow that lifts on hover
    Soft,
    /// Square card with a thick border and a hard offset shadow
    HardShadow,
    /// Flat card with a hairline border
    Flat,
}

impl CardStyle {
    /// Class list of the card container
    pub fn card_classes(self) -> &'static str {
        match self {
            CardStyle::Soft => {
                "product-card group bg-white rounded-3xl shadow-sm hover:shadow-xl overflow-hidden border border-stone-100 transition-all duration-300 transform hover:-translate-y-2"
            }
            CardStyle::HardShadow => {
                "product-card group bg-white rounded-none overflow-hidden border-4 border-black shadow-[8px_8px_0_0_#000] transition-all duration-200 hover:translate-x-1 hover:translate-y-1 hover:shadow-[4px_4px_0_0_#000]"
            }
            CardStyle::Flat => {
                "product-card group bg-white rounded-none overflow-hidden border border-black/10 transition-colors duration-300 hover:border-black/40"
            }
        }
    }
}

/// Per-template bundle of style choices used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleBundle {
    /// Page background and text colors
    pub page: &'static str,
    pub hero: &'static str,
    pub nav: &'static str,
    pub heading_font: &'static str,
    /// Extra CSS rules for heading weight and case
    pub heading_treatment: &'static str,
    pub card: CardStyle,
    /// Classes added to product images
    pub image_filter: &'static str,
    /// Label of the product section and its nav link
    pub offerings_label: &'static str,
    /// Put the hero image before the copy on wide screens
    pub image_first: bool,
}

impl StyleBundle {
    /// Bundle used for templates this version does not know
    pub const FALLBACK: StyleBundle = StyleBundle {
        page: "bg-white text-black",
        hero: "bg-white",
        nav: NAV_DEFAULT,
        heading_font: JAKARTA_HEADING,
        heading_treatment: "",
        card: CardStyle::Soft,
        image_filter: "",
        offerings_label: "Products",
        image_first: false,
    };

    /// Look up the bundle for a template
    pub fn for_template(template: &TemplateId) -> StyleBundle {
        let base = StyleBundle::FALLBACK;
        match template {
            TemplateId::Modern => StyleBundle {
                page: "bg-slate-900 text-white",
                hero: "bg-gradient-to-br from-slate-900 via-slate-800 to-slate-900",
                ..base
            },
            TemplateId::Elegant => StyleBundle {
                page: "bg-stone-50 text-stone-800",
                ..base
            },
            TemplateId::Startup => StyleBundle {
                page: "bg-indigo-50 text-slate-900",
                hero: "bg-indigo-600 text-white",
                ..base
            },
            TemplateId::Coach => StyleBundle {
                page: "bg-[#faf9f6] text-stone-900",
                nav: NAV_SOFT,
                heading_font: SERIF_HEADING,
                offerings_label: "Services",
                image_first: true,
                ..base
            },
            TemplateId::Creative => StyleBundle {
                page: "bg-purple-50 text-purple-900",
                heading_treatment: "h1 { text-transform: uppercase; letter-spacing: -0.05em; line-height: 0.9 !important; }",
                card: CardStyle::HardShadow,
                ..base
            },
            TemplateId::Restaurant => StyleBundle {
                page: "bg-[#fdf8f4] text-stone-800",
                heading_font: SERIF_HEADING,
                ..base
            },
            TemplateId::Fitness => StyleBundle {
                page: "bg-slate-50 text-slate-900",
                heading_treatment: "h1, h2 { font-weight: 900; font-style: italic; text-transform: uppercase; }",
                ..base
            },
            TemplateId::Minimalist => StyleBundle {
                heading_font: INTER,
                card: CardStyle::Flat,
                image_filter: "grayscale group-hover:grayscale-0",
                ..base
            },
            TemplateId::Unrecognized(name) => {
                tracing::debug!(template = %name, "using fallback style bundle");
                base
            }
        }
    }
}

/// Body text font shared by every template
pub const BODY_FONT: &str = INTER;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_schemes_match_table() {
        let expected = [
            (TemplateId::Modern, "bg-slate-900 text-white"),
            (TemplateId::Elegant, "bg-stone-50 text-stone-800"),
            (TemplateId::Startup, "bg-indigo-50 text-slate-900"),
            (TemplateId::Coach, "bg-[#faf9f6] text-stone-900"),
            (TemplateId::Creative, "bg-purple-50 text-purple-900"),
            (TemplateId::Restaurant, "bg-[#fdf8f4] text-stone-800"),
            (TemplateId::Fitness, "bg-slate-50 text-slate-900"),
            (TemplateId::Minimalist, "bg-white text-black"),
        ];
        for (id, page) in expected {
            assert_eq!(StyleBundle::for_template(&id).page, page, "template {}", id);
        }
    }

    #[test]
    fn test_heading_fonts() {
        assert_eq!(StyleBundle::for_template(&TemplateId::Coach).heading_font, SERIF_HEADING);
        assert_eq!(StyleBundle::for_template(&TemplateId::Restaurant).heading_font, SERIF_HEADING);
        assert_eq!(StyleBundle::for_template(&TemplateId::Minimalist).heading_font, INTER);
        assert_eq!(StyleBundle::for_template(&TemplateId::Fitness).heading_font, JAKARTA_HEADING);
        assert_eq!(StyleBundle::for_template(&TemplateId::Modern).heading_font, JAKARTA_HEADING);
    }

    #[test]
    fn test_hero_backgrounds() {
        assert!(StyleBundle::for_template(&TemplateId::Modern).hero.starts_with("bg-gradient-to-br"));
        assert_eq!(StyleBundle::for_template(&TemplateId::Startup).hero, "bg-indigo-600 text-white");
        assert_eq!(StyleBundle::for_template(&TemplateId::Elegant).hero, "bg-white");
    }

    #[test]
    fn test_card_variants() {
        assert_eq!(StyleBundle::for_template(&TemplateId::Creative).card, CardStyle::HardShadow);
        assert!(CardStyle::HardShadow.card_classes().contains("shadow-[8px_8px_0_0_#000]"));

        let minimalist = StyleBundle::for_template(&TemplateId::Minimalist);
        assert_eq!(minimalist.card, CardStyle::Flat);
        assert!(minimalist.image_filter.contains("grayscale"));

        assert_eq!(StyleBundle::for_template(&TemplateId::Coach).card, CardStyle::Soft);
    }

    #[test]
    fn test_coach_layout() {
        let coach = StyleBundle::for_template(&TemplateId::Coach);
        assert_eq!(coach.offerings_label, "Services");
        assert!(coach.image_first);
        assert_eq!(coach.nav, NAV_SOFT);
    }

    #[test]
    fn test_unknown_template_falls_back() {
        let bundle = StyleBundle::for_template(&TemplateId::Unrecognized("neon".to_string()));
        assert_eq!(bundle, StyleBundle::FALLBACK);
        assert_eq!(bundle.page, "bg-white text-black");
        assert_eq!(bundle.hero, "bg-white");
    }
}
