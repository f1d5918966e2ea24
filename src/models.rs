use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Crops tracked by a fresh session, in display order.
pub const DEFAULT_CROPS: [&str; 7] = [
    "Wheat",
    "Corn",
    "Soybean Meal",
    "Soybean Oil",
    "Soybean",
    "Rice",
    "Sorghum",
];

pub const DEFAULT_COUNTRY: &str = "China";

/// Key holding the year in a serialized record; never usable as a crop name.
pub const YEAR_FIELD: &str = "year";

/// First and last year of the default (all-zero) table.
pub const DEFAULT_FIRST_YEAR: i32 = 2010;
pub const DEFAULT_LAST_YEAR: i32 = 2023;

/// Which kind of quantity the table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Production,
    Import,
    Consumption,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Production, DataType::Import, DataType::Consumption];

    /// Lowercase identifier used in exports and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Production => "production",
            DataType::Import => "import",
            DataType::Consumption => "consumption",
        }
    }

    /// Capitalized label used in titles and headers.
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Production => "Production",
            DataType::Import => "Import",
            DataType::Consumption => "Consumption",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(DataType::Production),
            "import" => Ok(DataType::Import),
            "consumption" => Ok(DataType::Consumption),
            other => Err(format!(
                "unknown data type '{other}', expected production, import or consumption"
            )),
        }
    }
}

/// Ordered list of unique crop names; defines the fields every record carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropList(Vec<String>);

impl CropList {
    /// Build from names, dropping duplicates while keeping first-seen order.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !out.contains(&name) {
                out.push(name);
            }
        }
        Self(out)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|c| c == name)
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.0.get(idx).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// New list with `name` appended (unchanged if already present).
    pub fn with(&self, name: &str) -> Self {
        let mut out = self.clone();
        if !out.contains(name) {
            out.0.push(name.to_string());
        }
        out
    }

    /// New list without `name`.
    pub fn without(&self, name: &str) -> Self {
        Self(self.0.iter().filter(|c| *c != name).cloned().collect())
    }
}

impl Default for CropList {
    fn default() -> Self {
        Self::new(DEFAULT_CROPS)
    }
}

impl<'a> IntoIterator for &'a CropList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One year's crop values.
///
/// Values are kept as an ordered `crop -> value` list so iteration and
/// serialization follow the order in which crops were added. A crop that is
/// not present reads as `0`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataRecord {
    pub year: i32,
    values: Vec<(String, i64)>,
}

impl DataRecord {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            values: Vec::new(),
        }
    }

    /// A record with every crop of `crops` set to 0.
    pub fn zeroed(year: i32, crops: &CropList) -> Self {
        Self {
            year,
            values: crops.iter().map(|c| (c.to_string(), 0)).collect(),
        }
    }

    /// Builder used by example data and tests.
    pub fn with_values<I, S>(year: i32, values: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut rec = Self::new(year);
        for (crop, v) in values {
            let crop: String = crop.into();
            rec.set(&crop, v);
        }
        rec
    }

    /// Stored value, if the crop field exists.
    pub fn value(&self, crop: &str) -> Option<i64> {
        self.values.iter().find(|(c, _)| c == crop).map(|(_, v)| *v)
    }

    /// Value with the "absent reads as 0" rule applied.
    pub fn get(&self, crop: &str) -> i64 {
        self.value(crop).unwrap_or(0)
    }

    pub fn set(&mut self, crop: &str, value: i64) {
        match self.values.iter_mut().find(|(c, _)| c == crop) {
            Some((_, v)) => *v = value,
            None => self.values.push((crop.to_string(), value)),
        }
    }

    pub fn remove(&mut self, crop: &str) -> Option<i64> {
        let idx = self.values.iter().position(|(c, _)| c == crop)?;
        Some(self.values.remove(idx).1)
    }

    pub fn contains(&self, crop: &str) -> bool {
        self.values.iter().any(|(c, _)| c == crop)
    }

    /// Crop fields in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(c, v)| (c.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Serialized as a flat object: `{"year": 2020, "Wheat": 100, ...}`.
impl Serialize for DataRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(YEAR_FIELD, &self.year)?;
        for (crop, v) in &self.values {
            map.serialize_entry(crop, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DataRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = DataRecord;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an object with a `year` and numeric crop fields")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut year: Option<i32> = None;
                let mut values: Vec<(String, i64)> = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    if key == YEAR_FIELD {
                        if year.is_some() {
                            return Err(de::Error::duplicate_field(YEAR_FIELD));
                        }
                        let raw = map.next_value::<LenientNumber>()?.0;
                        let y = i32::try_from(raw).map_err(|_| {
                            de::Error::custom(format!("year out of range: {raw}"))
                        })?;
                        year = Some(y);
                    } else {
                        let v = map.next_value::<LenientNumber>()?.0;
                        match values.iter_mut().find(|(c, _)| *c == key) {
                            Some((_, slot)) => *slot = v,
                            None => values.push((key, v)),
                        }
                    }
                }
                let year = year.ok_or_else(|| de::Error::missing_field(YEAR_FIELD))?;
                Ok(DataRecord { year, values })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

/// Serde helper: accept integers, floats (rounded), or numeric strings.
struct LenientNumber(i64);

impl<'de> Deserialize<'de> for LenientNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumberVisitor;

        impl<'de> Visitor<'de> for NumberVisitor {
            type Value = LenientNumber;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a number or a numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(LenientNumber(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(LenientNumber)
                    .map_err(|_| E::custom("number out of range"))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if !v.is_finite() {
                    return Err(E::custom("non-finite number"));
                }
                Ok(LenientNumber(v.round() as i64))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
                crate::format::parse_formatted_number(s)
                    .map(LenientNumber)
                    .ok_or_else(|| E::custom(format!("not a number: {s:?}")))
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

/// All-zero table for `DEFAULT_FIRST_YEAR..=DEFAULT_LAST_YEAR` over `crops`.
pub fn default_data(crops: &CropList) -> Vec<DataRecord> {
    (DEFAULT_FIRST_YEAR..=DEFAULT_LAST_YEAR)
        .map(|year| DataRecord::zeroed(year, crops))
        .collect()
}

// Columns follow DEFAULT_CROPS order.
const EXAMPLE_ROWS: [(i32, [i64; 7]); 14] = [
    (2010, [116093, 190752, 43560, 9856, 15410, 138058, 1933]),
    (2011, [118570, 211316, 48312, 10931, 14879, 142018, 1892]),
    (2012, [122475, 229559, 51480, 11648, 13436, 144572, 1990]),
    (2013, [123639, 248453, 54569, 12347, 12407, 144400, 2430]),
    (2014, [128235, 249764, 59004, 13350, 12686, 146726, 2500]),
    (2015, [132555, 264992, 64548, 14605, 12367, 148499, 2203]),
    (2016, [133188, 263613, 69696, 15770, 13596, 147766, 2235]),
    (2017, [134241, 259071, 71280, 16128, 15283, 148873, 2465]),
    (2018, [131441, 257174, 67320, 15232, 15967, 148490, 2909]),
    (2019, [133600, 260779, 72468, 16397, 18092, 144730, 3137]),
    (2020, [134250, 260670, 75240, 17024, 19602, 148300, 2970]),
    (2021, [136946, 272552, 71280, 16128, 16395, 148990, 3377]),
    (2022, [137723, 277200, 76032, 17203, 20284, 145946, 3094]),
    (2023, [136590, 288842, 78408, 17741, 20840, 149000, 3000]),
];

/// China production figures (1000 MT) for the default crops, 2010-2023.
pub fn example_data() -> Vec<DataRecord> {
    EXAMPLE_ROWS
        .iter()
        .map(|(year, vals)| DataRecord::with_values(*year, DEFAULT_CROPS.iter().copied().zip(*vals)))
        .collect()
}
