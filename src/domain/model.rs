use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::VisaError;

/// Declares a closed set of configuration tokens. Conversion from text is
/// exact and case-sensitive; anything outside the set is an `UnknownToken`.
macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($domain:literal) {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl FromStr for $name {
            type Err = VisaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    other => Err(VisaError::UnknownToken {
                        domain: $domain,
                        token: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = String::deserialize(deserializer)?;
                token.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

token_enum! {
    Country ("country") {
        UnitedStates => "USA",
        Canada => "CANADA",
        Mexico => "MEXICO",
        Brazil => "BRAZIL",
        UnitedKingdom => "UK",
        Ireland => "IRELAND",
        France => "FRANCE",
        Germany => "GERMANY",
        Italy => "ITALY",
        Spain => "SPAIN",
        India => "INDIA",
        China => "CHINA",
        Japan => "JAPAN",
        SouthKorea => "SOUTH_KOREA",
        Singapore => "SINGAPORE",
        Thailand => "THAILAND",
        Uae => "UAE",
        Turkey => "TURKEY",
        Australia => "AUSTRALIA",
        NewZealand => "NEW_ZEALAND",
        SouthAfrica => "SOUTH_AFRICA",
    }
}

token_enum! {
    TravelPurpose ("travel purpose") {
        Tourism => "TOURISM",
        Business => "BUSINESS",
        Study => "STUDY",
        Work => "WORK",
        Transit => "TRANSIT",
    }
}

token_enum! {
    /// How the traveller obtains permission to enter.
    VisaCategory ("visa category") {
        VisaFree => "VISA_FREE",
        VisaOnArrival => "VISA_ON_ARRIVAL",
        ElectronicTravelAuthorization => "ETA",
        EVisa => "E_VISA",
        EmbassyVisa => "EMBASSY_VISA",
    }
}

token_enum! {
    VisaType ("visa type") {
        None => "NONE",
        Tourist => "TOURIST",
        Business => "BUSINESS",
        Student => "STUDENT",
        Work => "WORK",
        Transit => "TRANSIT",
    }
}

token_enum! {
    DocumentType ("document type") {
        Passport => "PASSPORT",
        Photo => "PHOTO",
        ApplicationForm => "APPLICATION_FORM",
        BankStatement => "BANK_STATEMENT",
        ReturnTicket => "RETURN_TICKET",
        HotelBooking => "HOTEL_BOOKING",
        TravelInsurance => "TRAVEL_INSURANCE",
        InvitationLetter => "INVITATION_LETTER",
        AdmissionLetter => "ADMISSION_LETTER",
        EmploymentContract => "EMPLOYMENT_CONTRACT",
        OnwardTicket => "ONWARD_TICKET",
    }
}

/// A configured mapping from trip attributes to a visa outcome.
///
/// Rules only come into existence fully populated; the parser drops any
/// record that cannot supply every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaRule {
    pub destination: Country,
    pub passport_country: Country,
    pub purpose: TravelPurpose,
    pub max_stay_days: u32,
    pub visa_required: bool,
    pub visa_category: VisaCategory,
    pub visa_type: VisaType,
    #[serde(default)]
    pub documents: Vec<DocumentType>,
    pub processing_days: u32,
}

impl VisaRule {
    /// Route and purpose equality plus the inclusive stay bound.
    pub fn matches(
        &self,
        destination: Country,
        passport: Country,
        purpose: TravelPurpose,
        stay_days: u32,
    ) -> bool {
        self.destination == destination
            && self.passport_country == passport
            && self.purpose == purpose
            && stay_days <= self.max_stay_days
    }
}

/// The parameters of one evaluation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripQuery {
    pub destination: Country,
    pub passport: Country,
    pub purpose: TravelPurpose,
    pub stay_days: u32,
}

pub const NO_RULE_WARNING: &str = "No visa rule found for this route";
pub const MULTIPLE_RULES_WARNING: &str = "Multiple rules matched, using first";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaDecision {
    pub visa_required: bool,
    pub visa_category: VisaCategory,
    pub visa_type: VisaType,
    pub documents: Vec<DocumentType>,
    pub processing_days: u32,
    pub warnings: Vec<String>,
}

impl VisaDecision {
    /// Conservative outcome used when no configured rule covers the route.
    pub fn fallback() -> Self {
        Self {
            visa_required: true,
            visa_category: VisaCategory::EmbassyVisa,
            visa_type: VisaType::None,
            documents: Vec::new(),
            processing_days: 0,
            warnings: vec![NO_RULE_WARNING.to_string()],
        }
    }

    pub fn from_rule(rule: &VisaRule, warnings: Vec<String>) -> Self {
        Self {
            visa_required: rule.visa_required,
            visa_category: rule.visa_category,
            visa_type: rule.visa_type,
            documents: rule.documents.clone(),
            processing_days: rule.processing_days,
            warnings,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.warnings.iter().any(|w| w == NO_RULE_WARNING)
    }
}
