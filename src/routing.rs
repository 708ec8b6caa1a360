//! Territory-based lead routing.
//!
//! Three fixed sales owners each cover a set of states. Assignment is a pure
//! function of (state, revenue) over that configuration: revenue at or above
//! the high-value threshold always routes to the designated high-value owner,
//! otherwise the first owner whose territory contains the state wins, and
//! unknown states fall back to the default owner. Round-robin and time-based
//! strategies exist as standalone alternatives and are never invoked by the
//! submission flow.

use serde::Serialize;

/// Leads from businesses at or above this annual revenue always route to the
/// high-value owner, regardless of geography.
pub const HIGH_VALUE_REVENUE: i64 = 10_000_000;

/// A sales contact eligible to receive routed leads.
#[derive(Debug, Clone, Serialize)]
pub struct Owner {
    pub name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub territories: &'static [&'static str],
    pub timezone: &'static str,
}

/// Immutable routing configuration: the three owners in declaration order.
/// The first owner is both the high-value owner and the default for unknown
/// states.
#[derive(Debug, Clone)]
pub struct SalesTeam {
    pub owners: [Owner; 3],
}

const MIDWEST_WEST: &[&str] = &[
    "IL", "WI", "IN", "MI", "OH", "IA", "MO", "MN", "ND", "SD", "NE", "KS", "MT", "WY", "CO",
    "NM", "UT", "ID", "WA", "OR", "CA", "NV", "AZ", "AK", "HI",
];

const NORTHEAST: &[&str] = &[
    "NY", "CT", "NJ", "PA", "MA", "VT", "NH", "ME", "RI", "DE", "MD", "DC",
];

const SOUTHEAST: &[&str] = &[
    "FL", "GA", "SC", "NC", "VA", "WV", "KY", "TN", "AL", "MS", "LA", "AR", "TX", "OK",
];

impl SalesTeam {
    /// The production sales team.
    pub fn standard() -> Self {
        Self {
            owners: [
                Owner {
                    name: "Mark Walters",
                    email: "mark@joinalliancerisk.com",
                    phone: "312-555-0140",
                    territories: MIDWEST_WEST,
                    timezone: "America/Chicago",
                },
                Owner {
                    name: "David",
                    email: "david@joinalliancerisk.com",
                    phone: "212-321-7475",
                    territories: NORTHEAST,
                    timezone: "America/New_York",
                },
                Owner {
                    name: "Jason",
                    email: "jason@joinalliancerisk.com",
                    phone: "305-555-0182",
                    territories: SOUTHEAST,
                    timezone: "America/New_York",
                },
            ],
        }
    }

    /// Assign an owner for a submission. Total: every (state, revenue) pair
    /// resolves to exactly one owner.
    pub fn assign(&self, state: &str, revenue: i64) -> &Owner {
        if revenue >= HIGH_VALUE_REVENUE {
            return &self.owners[0];
        }

        for owner in &self.owners {
            if owner.territories.contains(&state) {
                return owner;
            }
        }

        &self.owners[0]
    }

    /// Alternate strategy: cycle through the owners in declaration order.
    /// An unrecognized `last_assigned` name restarts the cycle at the first
    /// owner.
    pub fn round_robin_assign(&self, last_assigned: &str) -> &Owner {
        let next = match self.owners.iter().position(|o| o.name == last_assigned) {
            Some(index) => (index + 1) % self.owners.len(),
            None => 0,
        };
        &self.owners[next]
    }

    /// Alternate strategy: during East Coast business hours (8am-6pm),
    /// alternate between the two eastern owners on the hour's parity; outside
    /// those hours defer to geographic assignment.
    pub fn time_based_assign(&self, eastern_hour: u32) -> Option<&Owner> {
        if (8..=18).contains(&eastern_hour) {
            if eastern_hour % 2 == 0 {
                Some(&self.owners[1])
            } else {
                Some(&self.owners[2])
            }
        } else {
            None
        }
    }
}
