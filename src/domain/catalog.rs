//! Product catalog: plans, feature blurbs and site routes.

/// A subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    /// Plan name.
    pub name: &'static str,
    /// Displayed price.
    pub price: &'static str,
    /// Billing period.
    pub period: &'static str,
    /// One-line pitch.
    pub description: &'static str,
    /// Included features.
    pub features: &'static [&'static str],
    /// Button label.
    pub call_to_action: &'static str,
    /// Marked as the recommended plan.
    pub highlighted: bool,
}

/// A marketing feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    /// Headline.
    pub title: &'static str,
    /// Blurb.
    pub description: &'static str,
}

/// A navigable page of the product site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Route path.
    pub path: &'static str,
    /// Page title.
    pub title: &'static str,
}

/// Pricing plans, cheapest first.
pub const PLANS: [Plan; 3] = [
    Plan {
        name: "Free",
        price: "₹0",
        period: "forever",
        description: "Get started with basic usage",
        features: &[
            "5 images/day",
            "Max 10MB per image",
            "Standard processing",
            "7-day history",
        ],
        call_to_action: "Start Free",
        highlighted: false,
    },
    Plan {
        name: "Pro",
        price: "₹499",
        period: "/month",
        description: "Unlimited processing for professionals",
        features: &[
            "Unlimited images",
            "Max 10MB per image",
            "Priority processing",
            "30-day history",
            "Batch upload",
            "API access",
        ],
        call_to_action: "Go Pro",
        highlighted: true,
    },
    Plan {
        name: "API",
        price: "₹999",
        period: "/month",
        description: "For developers and businesses",
        features: &[
            "5,000 API calls/month",
            "Dedicated API key",
            "Webhook support",
            "Usage analytics",
            "Priority support",
            "SLA guarantee",
        ],
        call_to_action: "Get API Access",
        highlighted: false,
    },
];

/// Feature blurbs.
pub const FEATURES: [Feature; 6] = [
    Feature {
        title: "Lightning Fast",
        description: "Process images in under 5 seconds with our optimized AI pipeline.",
    },
    Feature {
        title: "HD Quality",
        description: "Support for images up to 5000×5000px. JPG, PNG, and WebP formats.",
    },
    Feature {
        title: "Privacy First",
        description: "Images auto-delete after 24 hours. No permanent storage.",
    },
    Feature {
        title: "Developer API",
        description: "RESTful API with rate limiting, usage tracking, and full documentation.",
    },
    Feature {
        title: "Batch Processing",
        description: "Process multiple images at once with our Pro and API plans.",
    },
    Feature {
        title: "Upload History",
        description: "Access your processed images for 7 days from your dashboard.",
    },
];

/// Site map.
pub const ROUTES: [Route; 7] = [
    Route { path: "/", title: "Home" },
    Route { path: "/features", title: "Features" },
    Route { path: "/pricing", title: "Pricing" },
    Route { path: "/login", title: "Log in" },
    Route { path: "/register", title: "Get Started" },
    Route { path: "/upload", title: "Remove Background" },
    Route { path: "/api-docs", title: "API" },
];

/// The plan promoted on the pricing page.
#[must_use]
pub fn highlighted_plan() -> Option<&'static Plan> {
    PLANS.iter().find(|plan| plan.highlighted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_highlighted_plan() {
        assert_eq!(PLANS.iter().filter(|p| p.highlighted).count(), 1);
        assert_eq!(highlighted_plan().map(|p| p.name), Some("Pro"));
    }

    #[test]
    fn test_routes_are_unique() {
        for (i, a) in ROUTES.iter().enumerate() {
            assert!(ROUTES.iter().skip(i + 1).all(|b| b.path != a.path));
        }
    }
}
