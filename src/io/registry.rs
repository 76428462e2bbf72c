use super::error::IoError;

const ENDPOINT_BASE: &str = "https://code.s3.yandex.net/async-module";

/// Built-in cities: key, endpoint file stem, localized display name
const BUILTIN_CITIES: [(&str, &str, &str); 15] = [
    ("MOSCOW", "moscow", "Москва"),
    ("PARIS", "paris", "Париж"),
    ("LONDON", "london", "Лондон"),
    ("BERLIN", "berlin", "Берлин"),
    ("BEIJING", "beijing", "Пекин"),
    ("KAZAN", "kazan", "Казань"),
    ("SPETERSBURG", "spetersburg", "Санкт-Петербург"),
    ("VOLGOGRAD", "volgograd", "Волгоград"),
    ("NOVOSIBIRSK", "novosibirsk", "Новосибирск"),
    ("KALININGRAD", "kaliningrad", "Калининград"),
    ("ABUDHABI", "abudhabi", "Абу-Даби"),
    ("WARSZAWA", "warszawa", "Варшава"),
    ("BUCHAREST", "bucharest", "Бухарест"),
    ("ROMA", "roma", "Рим"),
    ("CAIRO", "cairo", "Каир"),
];

/// Registry entry for one city
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityEntry {
    pub key: String,
    pub endpoint: String,
    pub display_name: String,
}

/// Static city key → endpoint/display-name mapping, fixed at startup
#[derive(Debug, Clone)]
pub struct CityRegistry {
    entries: Vec<CityEntry>,
}

impl CityRegistry {
    /// Create a registry from explicit entries; keys are stored upper-cased
    pub fn new(entries: impl IntoIterator<Item = CityEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|mut e| {
                    e.key = e.key.to_uppercase();
                    e
                })
                .collect(),
        }
    }

    /// The fifteen cities the ranking is computed over
    pub fn builtin() -> Self {
        Self::new(BUILTIN_CITIES.iter().map(|(key, stem, display)| CityEntry {
            key: key.to_string(),
            endpoint: format!("{ENDPOINT_BASE}/{stem}-response.json"),
            display_name: display.to_string(),
        }))
    }

    /// City keys in registry order
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a city, ignoring case
    pub fn get(&self, key: &str) -> Result<&CityEntry, IoError> {
        let wanted = key.to_uppercase();
        self.entries
            .iter()
            .find(|e| e.key == wanted)
            .ok_or_else(|| IoError::UnknownCity(key.to_string()))
    }

    pub fn endpoint(&self, key: &str) -> Result<&str, IoError> {
        self.get(key).map(|e| e.endpoint.as_str())
    }

    pub fn display_name(&self, key: &str) -> Result<&str, IoError> {
        self.get(key).map(|e| e.display_name.as_str())
    }
}
