// Static port reference data and the lookup tables built from it.
use crate::types::GeoPoint;
use once_cell::sync::Lazy;
use std::collections::HashMap;

// (UN/LOCODE, display name, lat, lng)
const PORTS: &[(&str, &str, f64, f64)] = &[
    ("AEJEA", "Jebel Ali", 25.0108, 55.0618),
    ("AEKHL", "Khalifa Port", 24.765, 54.556),
    ("BEANR", "Antwerp", 51.2637, 4.4123),
    ("BRSSZ", "Santos", -23.954, -46.326),
    ("CNNBG", "Ningbo", 29.871, 121.544),
    ("CNQDG", "Qingdao", 36.067, 120.382),
    ("CNSHA", "Shanghai", 31.2304, 121.4737),
    ("CNSZX", "Shenzhen", 22.5431, 114.0579),
    ("CNTXG", "Tianjin", 38.9833, 117.7333),
    ("CNXMN", "Xiamen", 24.4798, 118.0895),
    ("CNYTN", "Yantian", 22.56, 114.287),
    ("DEBRV", "Bremerhaven", 53.5396, 8.5821),
    ("DEHAM", "Hamburg", 53.5511, 9.9937),
    ("ESALG", "Algeciras", 36.1408, -5.4562),
    ("ESVLC", "Valencia", 39.4549, -0.3169),
    ("FRLEH", "Le Havre", 49.4944, 0.1079),
    ("GBFXT", "Felixstowe", 51.9617, 1.3505),
    ("GBSOU", "Southampton", 50.904, -1.4043),
    ("GRPIR", "Piraeus", 37.9497, 23.6417),
    ("HKHKG", "Hong Kong", 22.3193, 114.1694),
    ("IDJKT", "Jakarta", -6.106, 106.883),
    ("INNSA", "Nhava Sheva", 18.9535, 72.9527),
    ("ITGIT", "Gioia Tauro", 38.43, 15.898),
    ("ITSPE", "La Spezia", 44.1069, 9.8287),
    ("JPOSA", "Osaka", 34.6653, 135.43),
    ("JPTYO", "Tokyo", 35.6762, 139.6503),
    ("KRPUS", "Busan", 35.1796, 129.0756),
    ("MYPKG", "Port Klang", 3.0206, 101.3839),
    ("MYTPP", "Tanjung Pelepas", 1.362, 103.536),
    ("NLRTM", "Rotterdam", 51.9244, 4.4777),
    ("PAPTY", "Panama City", 8.949, -79.555),
    ("SADMM", "Dammam", 26.5099, 50.214),
    ("SGSIN", "Singapore", 1.2644, 103.822),
    ("THLCB", "Laem Chabang", 13.086, 100.89),
    ("TWKHH", "Kaohsiung", 22.6273, 120.3014),
    ("USLAX", "Los Angeles", 33.7405, -118.276),
    ("USNYC", "New York / New Jersey", 40.6681, -74.0451),
    ("USSEA", "Seattle", 47.6062, -122.3321),
    ("VNSGN", "Ho Chi Minh City", 10.77, 106.7),
];

// Business unit name -> port code of the terminal it operates.
const BUSINESS_UNITS: &[(&str, &str)] = &[
    ("PANAMA CITY", "PAPTY"),
    ("BUSAN", "KRPUS"),
    ("DAMMAM", "SADMM"),
    ("JAKARTA", "IDJKT"),
    ("LAEM CHABANG", "THLCB"),
    ("MUMBAI", "INNSA"),
    ("SINGAPORE", "SGSIN"),
    ("TIANJIN", "CNTXG"),
    ("ANTWERP", "BEANR"),
];

static BUILTIN: Lazy<GeoResolver> = Lazy::new(|| {
    let ports: Vec<GeoPoint> = PORTS
        .iter()
        .map(|&(code, name, lat, lng)| GeoPoint {
            code: code.to_string(),
            display_name: name.to_string(),
            lat,
            lng,
        })
        .collect();
    let units: Vec<(String, GeoPoint)> = BUSINESS_UNITS
        .iter()
        .filter_map(|&(unit, code)| {
            let port = ports.iter().find(|p| p.code == code)?;
            Some((unit.to_string(), port.clone()))
        })
        .collect();
    GeoResolver::new(ports, units)
});

/// Read-only lookup from business units and port codes to coordinates.
///
/// The pipeline takes a `&GeoResolver` instead of reaching for a global, so
/// tests can hand it a substitute table.
#[derive(Debug, Clone, Default)]
pub struct GeoResolver {
    by_business_unit: HashMap<String, GeoPoint>,
    by_port_code: HashMap<String, GeoPoint>,
}

impl GeoResolver {
    pub fn new(
        ports: impl IntoIterator<Item = GeoPoint>,
        business_units: impl IntoIterator<Item = (String, GeoPoint)>,
    ) -> Self {
        GeoResolver {
            by_port_code: ports
                .into_iter()
                .map(|p| (normalize_key(&p.code), p))
                .collect(),
            by_business_unit: business_units
                .into_iter()
                .map(|(unit, p)| (normalize_key(&unit), p))
                .collect(),
        }
    }

    /// The process-wide tables built from the bundled reference list.
    pub fn builtin() -> &'static GeoResolver {
        &BUILTIN
    }

    pub fn resolve_business_unit(&self, unit: &str) -> Option<&GeoPoint> {
        self.by_business_unit.get(&normalize_key(unit))
    }

    pub fn resolve_port(&self, code: &str) -> Option<&GeoPoint> {
        self.by_port_code.get(&normalize_key(code))
    }

    pub fn business_unit_count(&self) -> usize {
        self.by_business_unit.len()
    }

    pub fn port_count(&self) -> usize {
        self.by_port_code.len()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_builtin_tables() {
        // ---
        let geo = GeoResolver::builtin();
        assert_eq!(geo.port_count(), 39);
        assert_eq!(geo.business_unit_count(), 9);

        let busan = geo.resolve_business_unit("BUSAN").unwrap();
        assert_eq!(busan.code, "KRPUS");
        assert_eq!(busan.display_name, "Busan");
        assert_eq!(busan.lat, 35.1796);
        assert_eq!(busan.lng, 129.0756);
    }

    #[test]
    fn test_lookup_normalizes_keys() {
        // ---
        let geo = GeoResolver::builtin();
        assert_eq!(geo.resolve_port(" sgsin ").map(|p| p.display_name.as_str()), Some("Singapore"));
        assert_eq!(
            geo.resolve_business_unit("laem chabang").map(|p| p.code.as_str()),
            Some("THLCB")
        );
    }

    #[test]
    fn test_unknown_keys() {
        // ---
        let geo = GeoResolver::builtin();
        assert!(geo.resolve_business_unit("GENOA").is_none());
        assert!(geo.resolve_port("XXXXX").is_none());
        assert!(GeoResolver::default().resolve_port("SGSIN").is_none());
    }
}
