//! Partner routing: picks the extractor for an input file from its path.

use tracing::debug;

use super::{
    CreditRangeExtractor, FixedPositionExtractor, GenericExtractor, PdfTextExtractor,
    RemittanceExtractor,
};
use crate::models::config::{Layout, RemitConfig};

struct Route {
    partner: String,
    layout: Layout,
    extractor: Box<dyn RemittanceExtractor>,
}

/// The extractor chosen for one input.
pub struct Selection<'a> {
    /// Matched partner, `None` when the generic fallback was used.
    pub partner: Option<&'a str>,
    pub extractor: &'a dyn RemittanceExtractor,
}

/// Ordered partner routes with a generic fallback.
pub struct ExtractorRegistry {
    routes: Vec<Route>,
    fallback: Box<dyn RemittanceExtractor>,
}

impl ExtractorRegistry {
    /// Registry with no partner routes; every file goes to `fallback`.
    pub fn new(fallback: Box<dyn RemittanceExtractor>) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// Build the registry from the configured partner table.
    pub fn from_config(config: &RemitConfig) -> Self {
        let mut registry = Self::new(Box::new(GenericExtractor::from_config(config)));
        for route in &config.partners {
            registry.register(route.name.clone(), route.layout, build(route.layout, config));
        }
        registry
    }

    /// Append a route. Routes are tested in registration order.
    pub fn register(
        &mut self,
        partner: impl Into<String>,
        layout: Layout,
        extractor: Box<dyn RemittanceExtractor>,
    ) {
        self.routes.push(Route {
            partner: partner.into(),
            layout,
            extractor,
        });
    }

    /// Select by literal, case-sensitive substring match of the partner name
    /// against `path`. The first matching route wins.
    pub fn select(&self, path: &str) -> Selection<'_> {
        match self.routes.iter().find(|r| path.contains(&r.partner)) {
            Some(route) => {
                debug!("Routed {} to {} ({})", path, route.partner, route.extractor.name());
                Selection {
                    partner: Some(route.partner.as_str()),
                    extractor: route.extractor.as_ref(),
                }
            }
            None => {
                debug!("No partner matched {}, using generic layout", path);
                Selection {
                    partner: None,
                    extractor: self.fallback.as_ref(),
                }
            }
        }
    }

    /// Select a route by its exact partner name.
    pub fn by_partner(&self, name: &str) -> Option<Selection<'_>> {
        self.routes
            .iter()
            .find(|r| r.partner == name)
            .map(|route| Selection {
                partner: Some(route.partner.as_str()),
                extractor: route.extractor.as_ref(),
            })
    }

    /// Partner routes in match order, as `(partner, layout, extractor name)`.
    pub fn routes(&self) -> impl Iterator<Item = (&str, Layout, &'static str)> + '_ {
        self.routes
            .iter()
            .map(|r| (r.partner.as_str(), r.layout, r.extractor.name()))
    }

    /// The fallback extractor.
    pub fn fallback(&self) -> &dyn RemittanceExtractor {
        self.fallback.as_ref()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::from_config(&RemitConfig::default())
    }
}

fn build(layout: Layout, config: &RemitConfig) -> Box<dyn RemittanceExtractor> {
    match layout {
        Layout::FixedPosition => Box::new(FixedPositionExtractor::from_config(config)),
        Layout::CreditRange => Box::new(CreditRangeExtractor::from_config(config)),
        Layout::PdfText => Box::new(PdfTextExtractor::new()),
        Layout::Generic => Box::new(GenericExtractor::from_config(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::PartnerRoute;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_routes() {
        let registry = ExtractorRegistry::default();

        let s = registry.select("/in/Quick Mart Limited/Remittance 0824.xlsx");
        assert_eq!(s.partner, Some("Quick Mart Limited"));
        assert_eq!(s.extractor.name(), "fixed-position");

        let s = registry.select("Chandarana Supermarket - August.xlsx");
        assert_eq!(s.extractor.name(), "credit-range");

        let s = registry.select("Majid Al Futaim Hypermarkets Ltd.pdf");
        assert_eq!(s.extractor.name(), "pdf-text");
    }

    #[test]
    fn test_match_is_case_sensitive_with_fallback() {
        let registry = ExtractorRegistry::default();
        let s = registry.select("quick mart limited.xlsx");
        assert_eq!(s.partner, None);
        assert_eq!(s.extractor.name(), "generic");
    }

    #[test]
    fn test_first_match_wins() {
        let mut config = RemitConfig::default();
        config.partners = vec![
            PartnerRoute::new("Mart", Layout::Generic),
            PartnerRoute::new("Quick Mart", Layout::FixedPosition),
        ];
        let registry = ExtractorRegistry::from_config(&config);

        let s = registry.select("Quick Mart.xlsx");
        assert_eq!(s.partner, Some("Mart"));
        assert_eq!(s.extractor.name(), "generic");
    }

    #[test]
    fn test_by_partner_and_routes() {
        let registry = ExtractorRegistry::default();
        assert!(registry.by_partner("Chandarana Supermarket").is_some());
        assert!(registry.by_partner("Chandarana").is_none());

        let names: Vec<_> = registry.routes().map(|(name, _, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "Quick Mart Limited",
                "Chandarana Supermarket",
                "Majid Al Futaim Hypermarkets Ltd"
            ]
        );
    }
}
