//! Unit conversion tool

use crate::error::{Result, ToolError};
use crate::tools::builtin::calculator::format_number;
use crate::tools::{Tool, ToolExample};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

static RE_CONVERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:convert\s+)?(-?\d+\.?\d*)\s*([a-z]+)\s+(?:to|in|into)\s+([a-z]+)").unwrap()
});

/// Measurement categories; values only convert within one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Length,
    Weight,
    Volume,
    Temperature,
}

impl Category {
    fn as_str(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Weight => "weight",
            Category::Volume => "volume",
            Category::Temperature => "temperature",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

/// Factors relative to the base unit of each category (metre, kilogram, litre)
const LINEAR_UNITS: &[(Category, &[&str], f64)] = &[
    (Category::Length, &["meters", "meter", "metres", "metre", "m"], 1.0),
    (Category::Length, &["kilometers", "kilometer", "km"], 1000.0),
    (Category::Length, &["centimeters", "centimeter", "cm"], 0.01),
    (Category::Length, &["millimeters", "millimeter", "mm"], 0.001),
    (Category::Length, &["miles", "mile", "mi"], 1609.34),
    (Category::Length, &["yards", "yard", "yd"], 0.9144),
    (Category::Length, &["feet", "foot", "ft"], 0.3048),
    (Category::Length, &["inches", "inch", "in"], 0.0254),
    (Category::Weight, &["kilograms", "kilogram", "kg"], 1.0),
    (Category::Weight, &["grams", "gram", "g"], 0.001),
    (Category::Weight, &["milligrams", "milligram", "mg"], 0.000001),
    (Category::Weight, &["pounds", "pound", "lbs", "lb"], 0.453592),
    (Category::Weight, &["ounces", "ounce", "oz"], 0.0283495),
    (Category::Weight, &["tons", "ton"], 1000.0),
    (Category::Volume, &["liters", "liter", "litres", "litre", "l"], 1.0),
    (Category::Volume, &["milliliters", "milliliter", "ml"], 0.001),
    (Category::Volume, &["gallons", "gallon", "gal"], 3.78541),
    (Category::Volume, &["quarts", "quart", "qt"], 0.946353),
    (Category::Volume, &["pints", "pint", "pt"], 0.473176),
    (Category::Volume, &["cups", "cup"], 0.236588),
];

#[derive(Debug, Clone, Copy)]
enum Unit {
    Linear(Category, f64),
    Temperature(Scale),
}

impl Unit {
    fn lookup(name: &str) -> Option<Self> {
        let scale = match name {
            "celsius" | "c" => Some(Scale::Celsius),
            "fahrenheit" | "f" => Some(Scale::Fahrenheit),
            "kelvin" | "k" => Some(Scale::Kelvin),
            _ => None,
        };
        if let Some(scale) = scale {
            return Some(Unit::Temperature(scale));
        }

        LINEAR_UNITS
            .iter()
            .find(|(_, names, _)| names.contains(&name))
            .map(|&(category, _, factor)| Unit::Linear(category, factor))
    }

    fn category(&self) -> Category {
        match self {
            Unit::Linear(category, _) => *category,
            Unit::Temperature(_) => Category::Temperature,
        }
    }
}

fn convert_temperature(value: f64, from: Scale, to: Scale) -> f64 {
    let celsius = match from {
        Scale::Celsius => value,
        Scale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        Scale::Kelvin => value - 273.15,
    };
    match to {
        Scale::Celsius => celsius,
        Scale::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        Scale::Kelvin => celsius + 273.15,
    }
}

/// Round large values coarsely and small values finely
fn round_for_display(value: f64) -> f64 {
    let decimals = if value > 100.0 {
        2
    } else if value > 10.0 {
        3
    } else {
        4
    };
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Parse and perform a conversion, returning the formatted sentence
pub fn convert(query: &str) -> std::result::Result<String, String> {
    let lowered = query.trim().to_lowercase();
    let captures = RE_CONVERSION.captures(&lowered).ok_or_else(|| {
        "Please use format: 'X unit to unit' (e.g., '100 kilometers to miles')".to_string()
    })?;

    let value: f64 = captures[1]
        .parse()
        .map_err(|_| format!("invalid number '{}'", &captures[1]))?;
    let from_name = &captures[2];
    let to_name = &captures[3];

    let from = Unit::lookup(from_name).ok_or_else(|| format!("Unknown unit: {}", from_name))?;
    let to = Unit::lookup(to_name).ok_or_else(|| format!("Unknown unit: {}", to_name))?;

    if from.category() != to.category() {
        return Err(format!(
            "Cannot convert between {} and {}",
            from.category().as_str(),
            to.category().as_str()
        ));
    }

    let result = match (from, to) {
        (Unit::Temperature(a), Unit::Temperature(b)) => convert_temperature(value, a, b),
        (Unit::Linear(_, a), Unit::Linear(_, b)) => value * a / b,
        _ => unreachable!("categories already matched"),
    };

    Ok(format!(
        "{} {} = **{} {}**",
        format_number(value),
        from_name,
        round_for_display(result),
        to_name
    ))
}

/// Unit converter tool
pub struct UnitConverterTool;

impl UnitConverterTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnitConverterTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for UnitConverterTool {
    fn name(&self) -> &str {
        "unit_converter"
    }

    fn description(&self) -> &str {
        "Useful for converting between different units of measurement. \
         Input format: 'VALUE UNIT to UNIT' (e.g., '100 kilometers to miles', '5 feet to meters'). \
         Supports length (km, m, miles, feet, etc), weight (kg, lbs, etc), \
         temperature (celsius, fahrenheit, kelvin), and volume (liters, gallons, etc). \
         Use this when the user asks to convert units or asks 'how many X in Y'."
    }

    async fn execute(&self, input: &str) -> Result<String> {
        tracing::debug!("Converting '{}'", input);

        convert(input).map_err(|message| {
            ToolError::InvalidInput {
                message: format!("Cannot convert '{}': {}", input, message),
            }
            .into()
        })
    }

    fn examples(&self) -> Vec<ToolExample> {
        vec![
            ToolExample::new(
                "Distance",
                "100 kilometers to miles",
                "100 kilometers = **62.137 miles**",
            ),
            ToolExample::new(
                "Temperature",
                "convert 100 celsius to fahrenheit",
                "100 celsius = **212 fahrenheit**",
            ),
        ]
    }
}
