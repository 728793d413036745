//! Applicant Attributes

use crate::error::EncodingError;
use crate::table::{self, EncodingTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categorical applicant attribute, serialised by its feature name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoricalAttribute {
    #[serde(rename = "Account_Balance")]
    AccountBalance,
    #[serde(rename = "Payment_Status_of_Previous_Credit")]
    PaymentStatus,
    #[serde(rename = "Purpose")]
    Purpose,
    #[serde(rename = "Value_Savings_Stocks")]
    Savings,
    #[serde(rename = "Length_of_current_employment")]
    Employment,
    #[serde(rename = "Sex_Marital_Status")]
    SexMaritalStatus,
    #[serde(rename = "Guarantors")]
    Guarantors,
    #[serde(rename = "Most_valuable_available_asset")]
    MostValuableAsset,
    #[serde(rename = "Concurrent_Credits")]
    ConcurrentCredits,
    #[serde(rename = "Type_of_apartment")]
    Apartment,
    #[serde(rename = "Occupation")]
    Occupation,
    #[serde(rename = "Telephone")]
    Telephone,
    #[serde(rename = "Foreign_Worker")]
    ForeignWorker,
}

impl CategoricalAttribute {
    /// All categorical attributes in form order
    pub const ALL: [Self; crate::CATEGORICAL_COUNT] = [
        Self::AccountBalance,
        Self::PaymentStatus,
        Self::Purpose,
        Self::Savings,
        Self::Employment,
        Self::SexMaritalStatus,
        Self::Guarantors,
        Self::MostValuableAsset,
        Self::ConcurrentCredits,
        Self::Apartment,
        Self::Occupation,
        Self::Telephone,
        Self::ForeignWorker,
    ];

    /// Canonical feature name used by the model
    pub fn feature_name(&self) -> &'static str {
        match self {
            Self::AccountBalance => "Account_Balance",
            Self::PaymentStatus => "Payment_Status_of_Previous_Credit",
            Self::Purpose => "Purpose",
            Self::Savings => "Value_Savings_Stocks",
            Self::Employment => "Length_of_current_employment",
            Self::SexMaritalStatus => "Sex_Marital_Status",
            Self::Guarantors => "Guarantors",
            Self::MostValuableAsset => "Most_valuable_available_asset",
            Self::ConcurrentCredits => "Concurrent_Credits",
            Self::Apartment => "Type_of_apartment",
            Self::Occupation => "Occupation",
            Self::Telephone => "Telephone",
            Self::ForeignWorker => "Foreign_Worker",
        }
    }

    /// Caption shown next to the selection widget
    pub fn caption(&self) -> &'static str {
        match self {
            Self::AccountBalance => "Account balance",
            Self::PaymentStatus => "Previous payment history",
            Self::Purpose => "Credit purpose",
            Self::Savings => "Savings / stocks",
            Self::Employment => "Current employment length",
            Self::SexMaritalStatus => "Sex & marital status",
            Self::Guarantors => "Other guarantors",
            Self::MostValuableAsset => "Most valuable asset",
            Self::ConcurrentCredits => "Other running credits",
            Self::Apartment => "Housing type",
            Self::Occupation => "Occupation",
            Self::Telephone => "Telephone",
            Self::ForeignWorker => "Foreign worker",
        }
    }

    /// Encoding table for this attribute
    pub fn table(&self) -> &'static EncodingTable {
        match self {
            Self::AccountBalance => &table::ACCOUNT_BALANCE,
            Self::PaymentStatus => &table::PAYMENT_STATUS,
            Self::Purpose => &table::PURPOSE,
            Self::Savings => &table::SAVINGS,
            Self::Employment => &table::EMPLOYMENT,
            Self::SexMaritalStatus => &table::SEX_MARITAL_STATUS,
            Self::Guarantors => &table::GUARANTORS,
            Self::MostValuableAsset => &table::MOST_VALUABLE_ASSET,
            Self::ConcurrentCredits => &table::CONCURRENT_CREDITS,
            Self::Apartment => &table::APARTMENT,
            Self::Occupation => &table::OCCUPATION,
            Self::Telephone => &table::TELEPHONE,
            Self::ForeignWorker => &table::FOREIGN_WORKER,
        }
    }
}

impl fmt::Display for CategoricalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.feature_name())
    }
}

impl FromStr for CategoricalAttribute {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.feature_name() == s)
            .ok_or_else(|| EncodingError::UnknownFeature(s.to_string()))
    }
}

/// Inclusive numeric domain of a pass-through attribute
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericDomain {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl NumericDomain {
    const fn new(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self { min, max, default, step }
    }

    /// Whether the value lies inside the inclusive range
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Numeric applicant attribute passed to the model unencoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NumericAttribute {
    #[serde(rename = "Duration_of_Credit_monthly")]
    DurationMonths,
    #[serde(rename = "Credit_Amount")]
    CreditAmount,
    #[serde(rename = "Age_years")]
    Age,
    #[serde(rename = "Instalment_per_cent")]
    InstalmentPercent,
    #[serde(rename = "Duration_in_Current_address")]
    AddressYears,
    #[serde(rename = "No_of_Credits_at_this_Bank")]
    CreditsAtBank,
    #[serde(rename = "No_of_dependents")]
    Dependents,
}

impl NumericAttribute {
    /// All numeric attributes in form order
    pub const ALL: [Self; crate::NUMERIC_COUNT] = [
        Self::DurationMonths,
        Self::CreditAmount,
        Self::Age,
        Self::InstalmentPercent,
        Self::AddressYears,
        Self::CreditsAtBank,
        Self::Dependents,
    ];

    /// Canonical feature name used by the model
    pub fn feature_name(&self) -> &'static str {
        match self {
            Self::DurationMonths => "Duration_of_Credit_monthly",
            Self::CreditAmount => "Credit_Amount",
            Self::Age => "Age_years",
            Self::InstalmentPercent => "Instalment_per_cent",
            Self::AddressYears => "Duration_in_Current_address",
            Self::CreditsAtBank => "No_of_Credits_at_this_Bank",
            Self::Dependents => "No_of_dependents",
        }
    }

    /// Caption shown next to the input widget
    pub fn caption(&self) -> &'static str {
        match self {
            Self::DurationMonths => "Credit duration (months)",
            Self::CreditAmount => "Credit amount (DM)",
            Self::Age => "Applicant age (years)",
            Self::InstalmentPercent => "Instalment as % of disposable income",
            Self::AddressYears => "Years at current address",
            Self::CreditsAtBank => "Credits at this bank",
            Self::Dependents => "Number of dependents",
        }
    }

    /// Declared input domain
    pub fn domain(&self) -> NumericDomain {
        match self {
            Self::DurationMonths => NumericDomain::new(4.0, 72.0, 18.0, 1.0),
            Self::CreditAmount => NumericDomain::new(250.0, 20_000.0, 1500.0, 50.0),
            Self::Age => NumericDomain::new(19.0, 75.0, 35.0, 1.0),
            Self::InstalmentPercent => NumericDomain::new(1.0, 4.0, 2.0, 1.0),
            Self::AddressYears => NumericDomain::new(1.0, 4.0, 2.0, 1.0),
            Self::CreditsAtBank => NumericDomain::new(1.0, 4.0, 1.0, 1.0),
            Self::Dependents => NumericDomain::new(1.0, 2.0, 1.0, 1.0),
        }
    }
}

impl fmt::Display for NumericAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.feature_name())
    }
}

impl FromStr for NumericAttribute {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|attribute| attribute.feature_name() == s)
            .ok_or_else(|| EncodingError::UnknownFeature(s.to_string()))
    }
}

/// Any model feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Categorical(CategoricalAttribute),
    Numeric(NumericAttribute),
}

impl Feature {
    /// All features in training column order
    pub const ALL: [Self; crate::FEATURE_COUNT] = [
        Self::Categorical(CategoricalAttribute::AccountBalance),
        Self::Numeric(NumericAttribute::DurationMonths),
        Self::Categorical(CategoricalAttribute::PaymentStatus),
        Self::Categorical(CategoricalAttribute::Purpose),
        Self::Numeric(NumericAttribute::CreditAmount),
        Self::Categorical(CategoricalAttribute::Savings),
        Self::Categorical(CategoricalAttribute::Employment),
        Self::Numeric(NumericAttribute::InstalmentPercent),
        Self::Categorical(CategoricalAttribute::SexMaritalStatus),
        Self::Categorical(CategoricalAttribute::Guarantors),
        Self::Numeric(NumericAttribute::AddressYears),
        Self::Categorical(CategoricalAttribute::MostValuableAsset),
        Self::Numeric(NumericAttribute::Age),
        Self::Categorical(CategoricalAttribute::ConcurrentCredits),
        Self::Categorical(CategoricalAttribute::Apartment),
        Self::Numeric(NumericAttribute::CreditsAtBank),
        Self::Categorical(CategoricalAttribute::Occupation),
        Self::Numeric(NumericAttribute::Dependents),
        Self::Categorical(CategoricalAttribute::Telephone),
        Self::Categorical(CategoricalAttribute::ForeignWorker),
    ];

    /// Canonical feature name
    pub fn feature_name(&self) -> &'static str {
        match self {
            Self::Categorical(attribute) => attribute.feature_name(),
            Self::Numeric(attribute) => attribute.feature_name(),
        }
    }
}

impl FromStr for Feature {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<CategoricalAttribute>()
            .map(Self::Categorical)
            .or_else(|_| s.parse::<NumericAttribute>().map(Self::Numeric))
    }
}
