//! Custom-field vocabulary.

use std::collections::BTreeMap;

use crate::options::Options;
use crate::text::clean_field_value;

/// Known structured product attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CustomFieldKey {
    Brand,
    Model,
    Country,
    BatteryCapacity,
    OutputPower,
    TankCapacity,
    CoilResistance,
    ChargingType,
    DisplayType,
    Weight,
    Dimensions,
    Materials,
    Chipset,
    Colors,
    Airflow,
    VapeType,
}

impl CustomFieldKey {
    /// Every key, in the row order of the fallback attribute table.
    pub const ALL: [Self; 16] = [
        Self::Brand,
        Self::Model,
        Self::Country,
        Self::BatteryCapacity,
        Self::OutputPower,
        Self::TankCapacity,
        Self::CoilResistance,
        Self::ChargingType,
        Self::DisplayType,
        Self::Weight,
        Self::Dimensions,
        Self::Materials,
        Self::Chipset,
        Self::Colors,
        Self::Airflow,
        Self::VapeType,
    ];

    /// The camelCase key used in JSON and in records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Model => "model",
            Self::Country => "country",
            Self::BatteryCapacity => "batteryCapacity",
            Self::OutputPower => "outputPower",
            Self::TankCapacity => "tankCapacity",
            Self::CoilResistance => "coilResistance",
            Self::ChargingType => "chargingType",
            Self::DisplayType => "displayType",
            Self::Weight => "weight",
            Self::Dimensions => "dimensions",
            Self::Materials => "materials",
            Self::Chipset => "chipset",
            Self::Colors => "colors",
            Self::Airflow => "airflow",
            Self::VapeType => "vapeType",
        }
    }

    /// Persian display label.
    #[must_use]
    pub const fn default_label(self) -> &'static str {
        match self {
            Self::Brand => "برند",
            Self::Model => "مدل",
            Self::Country => "کشور سازنده",
            Self::BatteryCapacity => "ظرفیت باتری",
            Self::OutputPower => "توان خروجی",
            Self::TankCapacity => "ظرفیت پاد/تانک",
            Self::CoilResistance => "مقاومت کویل",
            Self::ChargingType => "نوع شارژ",
            Self::DisplayType => "نوع نمایشگر",
            Self::Weight => "وزن",
            Self::Dimensions => "ابعاد",
            Self::Materials => "مواد سازنده",
            Self::Chipset => "چیپست",
            Self::Colors => "رنگ‌های موجود",
            Self::Airflow => "جریان هوا",
            Self::VapeType => "نوع ویپ",
        }
    }
}

/// Keep vocabulary keys with meaningful values, each value cleaned.
#[must_use]
pub fn normalize_custom_fields(
    raw: &BTreeMap<String, String>,
    opts: &Options,
) -> BTreeMap<String, String> {
    raw.iter()
        .filter(|(key, _)| {
            let known = opts.knows_field(key);
            if !known {
                tracing::debug!(key = %key, "dropping custom field outside vocabulary");
            }
            known
        })
        .filter_map(|(key, value)| clean_field_value(value).map(|v| (key.clone(), v)))
        .collect()
}
