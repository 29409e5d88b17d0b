//! Continent presets and catalog files that seed quiz sessions.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use geo_quiz_core::{FeatureCatalog, FeatureId, GeographicFeature};
use glam::Vec2;
use serde::Deserialize;

const SUPPORTED_CATALOG_VERSION: u32 = 1;

const EUROPE: &[&str] = &[
    "Albania", "Andorra", "Austria", "Belarus", "Belgium", "Bosnia and Herzegovina", "Bulgaria",
    "Croatia", "Czechia", "Denmark", "Estonia", "Finland", "France", "Germany", "Greece",
    "Hungary", "Iceland", "Ireland", "Italy", "Kosovo", "Latvia", "Liechtenstein", "Lithuania",
    "Luxembourg", "Malta", "Moldova", "Monaco", "Montenegro", "Netherlands", "North Macedonia",
    "Norway", "Poland", "Portugal", "Romania", "Russia", "San Marino", "Serbia", "Slovakia",
    "Slovenia", "Spain", "Sweden", "Switzerland", "Ukraine", "United Kingdom",
];

const NORTH_AMERICA: &[&str] = &[
    "Antigua and Barbuda", "Bahamas", "Barbados", "Belize", "Canada", "Costa Rica", "Cuba",
    "Dominica", "Dominican Republic", "El Salvador", "Grenada", "Guatemala", "Haiti", "Honduras",
    "Jamaica", "Mexico", "Nicaragua", "Panama", "Saint Kitts and Nevis", "Saint Lucia",
    "Saint Vincent and the Grenadines", "Trinidad and Tobago", "United States",
];

const SOUTH_AMERICA: &[&str] = &[
    "Argentina", "Bolivia", "Brazil", "Chile", "Colombia", "Ecuador", "Guyana", "Paraguay",
    "Peru", "Suriname", "Uruguay", "Venezuela",
];

const ASIA: &[&str] = &[
    "Afghanistan", "Armenia", "Azerbaijan", "Bahrain", "Bangladesh", "Bhutan", "Brunei",
    "Cambodia", "China", "Cyprus", "Georgia", "India", "Indonesia", "Iran", "Iraq", "Israel",
    "Japan", "Jordan", "Kazakhstan", "Kuwait", "Kyrgyzstan", "Laos", "Lebanon", "Malaysia",
    "Maldives", "Mongolia", "Myanmar", "Nepal", "North Korea", "Oman", "Pakistan", "Philippines",
    "Qatar", "Saudi Arabia", "Singapore", "South Korea", "Sri Lanka", "Syria", "Taiwan",
    "Tajikistan", "Thailand", "Timor-Leste", "Turkey", "Turkmenistan", "United Arab Emirates",
    "Uzbekistan", "Vietnam", "Yemen",
];

const AFRICA: &[&str] = &[
    "Algeria", "Angola", "Benin", "Botswana", "Burkina Faso", "Burundi", "Cabo Verde", "Cameroon",
    "Central African Republic", "Chad", "Comoros", "Democratic Republic of the Congo", "Djibouti",
    "Egypt", "Equatorial Guinea", "Eritrea", "Eswatini", "Ethiopia", "Gabon", "Gambia", "Ghana",
    "Guinea", "Guinea-Bissau", "Ivory Coast", "Kenya", "Lesotho", "Liberia", "Libya",
    "Madagascar", "Malawi", "Mali", "Mauritania", "Mauritius", "Morocco", "Mozambique", "Namibia",
    "Niger", "Nigeria", "Republic of the Congo", "Rwanda", "Sao Tome and Principe", "Senegal",
    "Seychelles", "Sierra Leone", "Somalia", "South Africa", "South Sudan", "Sudan", "Tanzania",
    "Togo", "Tunisia", "Uganda", "Zambia", "Zimbabwe",
];

const OCEANIA: &[&str] = &[
    "Australia", "Fiji", "Kiribati", "Marshall Islands", "Micronesia", "Nauru", "New Zealand",
    "Palau", "Papua New Guinea", "Samoa", "Solomon Islands", "Tonga", "Tuvalu", "Vanuatu",
];

/// Map region selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Continent {
    /// European countries.
    Europe,
    /// North and Central American countries.
    NorthAmerica,
    /// South American countries.
    SouthAmerica,
    /// Asian countries.
    Asia,
    /// African countries.
    Africa,
    /// Oceanian countries.
    Oceania,
    /// Every country across all continents.
    World,
}

impl Continent {
    /// Display title used for the window and the result feed.
    pub(crate) const fn title(self) -> &'static str {
        match self {
            Self::Europe => "Europe",
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Asia => "Asia",
            Self::Africa => "Africa",
            Self::Oceania => "Oceania",
            Self::World => "The World",
        }
    }

    const fn camera(self) -> (Vec2, f32) {
        match self {
            Self::Europe => (Vec2::new(14.0, 54.0), 3.4),
            Self::NorthAmerica => (Vec2::new(-100.0, 45.0), 2.6),
            Self::SouthAmerica => (Vec2::new(-60.0, -15.0), 2.9),
            Self::Asia => (Vec2::new(90.0, 35.0), 2.6),
            Self::Africa => (Vec2::new(20.0, 2.0), 2.8),
            Self::Oceania => (Vec2::new(150.0, -25.0), 3.0),
            Self::World => (Vec2::new(10.0, 20.0), 1.4),
        }
    }

    fn feature_names(self) -> Vec<&'static str> {
        match self {
            Self::Europe => EUROPE.to_vec(),
            Self::NorthAmerica => NORTH_AMERICA.to_vec(),
            Self::SouthAmerica => SOUTH_AMERICA.to_vec(),
            Self::Asia => ASIA.to_vec(),
            Self::Africa => AFRICA.to_vec(),
            Self::Oceania => OCEANIA.to_vec(),
            Self::World => {
                let mut names = Vec::new();
                for list in [EUROPE, NORTH_AMERICA, SOUTH_AMERICA, ASIA, AFRICA, OCEANIA] {
                    names.extend_from_slice(list);
                }
                names
            }
        }
    }
}

/// Everything needed to boot a session for a map region.
#[derive(Clone, Debug)]
pub(crate) struct QuizSetup {
    /// Human-readable title for the window and the terminal feed.
    pub title: String,
    /// Features composing the playable map.
    pub catalog: FeatureCatalog,
    /// Camera center expressed as longitude and latitude.
    pub center: Vec2,
    /// Camera zoom level suiting the region.
    pub zoom: f32,
}

/// Builds the quiz setup for a continent preset.
pub(crate) fn preset(continent: Continent) -> Result<QuizSetup> {
    let features = continent
        .feature_names()
        .into_iter()
        .enumerate()
        .map(|(index, name)| GeographicFeature::new(FeatureId::new(index as u32 + 1), name))
        .collect();
    let catalog = FeatureCatalog::new(features).with_context(|| {
        format!(
            "continent preset {} is not a valid catalog",
            continent.title()
        )
    })?;
    let (center, zoom) = continent.camera();

    Ok(QuizSetup {
        title: format!("Geo Quiz - {}", continent.title()),
        catalog,
        center,
        zoom,
    })
}

/// Loads a quiz setup from the catalog file at the provided path.
pub(crate) fn load_file(path: &Path) -> Result<QuizSetup> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file at {}", path.display()))?;
    parse_catalog(&contents)
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: u32,
    name: String,
    center: [f32; 2],
    zoom: f32,
    features: Vec<CatalogFeature>,
}

#[derive(Debug, Deserialize)]
struct CatalogFeature {
    id: u32,
    name: String,
}

fn parse_catalog(contents: &str) -> Result<QuizSetup> {
    let file: CatalogFile =
        toml::from_str(contents).context("failed to parse catalog toml contents")?;
    if file.version != SUPPORTED_CATALOG_VERSION {
        bail!(
            "unsupported catalog version {}; expected {}",
            file.version,
            SUPPORTED_CATALOG_VERSION
        );
    }

    let features = file
        .features
        .into_iter()
        .map(|feature| GeographicFeature::new(FeatureId::new(feature.id), feature.name))
        .collect();
    let catalog =
        FeatureCatalog::new(features).context("catalog file holds an invalid feature set")?;

    Ok(QuizSetup {
        title: format!("Geo Quiz - {}", file.name),
        catalog,
        center: Vec2::new(file.center[0], file.center[1]),
        zoom: file.zoom,
    })
}
