//! Exhibitors known to the dashboard, in display order.

use crate::domain::Exhibitor;

const EXHIBITORS: &[Exhibitor] = &[
    Exhibitor {
        id: "nevetal",
        display_name: "nevetal",
        booth_number: "3005",
        company_category: "Event Services",
    },
    Exhibitor {
        id: "saint-lucia",
        display_name: "Saint Lucia Tourism Authority",
        booth_number: "B-156",
        company_category: "Tourism & Travel",
    },
    Exhibitor {
        id: "costa-rica",
        display_name: "Costa Rica",
        booth_number: "C-089",
        company_category: "Tourism Board",
    },
    Exhibitor {
        id: "dominica",
        display_name: "Discover Dominica Authority",
        booth_number: "D-312",
        company_category: "Tourism Authority",
    },
    Exhibitor {
        id: "italy-tour",
        display_name: "Great Italy Tour & Events",
        booth_number: "E-445",
        company_category: "Tour Operator",
    },
    Exhibitor {
        id: "quench-usa",
        display_name: "Quench USA",
        booth_number: "F-201",
        company_category: "Beverage Solutions",
    },
];

pub fn list_exhibitors() -> &'static [Exhibitor] {
    EXHIBITORS
}

pub fn find_exhibitor(id: &str) -> Option<&'static Exhibitor> {
    EXHIBITORS.iter().find(|exhibitor| exhibitor.id == id)
}
