// tiledash-widgets/src/sample.rs

pub const BALANCE_HISTORY: &[(&str, f64)] = &[
    ("Jan", 18_240.0),
    ("Feb", 19_010.5),
    ("Mar", 18_650.2),
    ("Apr", 20_115.0),
    ("May", 21_480.7),
    ("Jun", 21_020.3),
    ("Jul", 22_310.0),
    ("Aug", 23_005.9),
    ("Sep", 24_830.1),
];

pub const SPENDING_BY_CATEGORY: &[(&str, f64)] = &[
    ("Housing", 950.0),
    ("Groceries", 412.6),
    ("Transport", 180.0),
    ("Leisure", 264.3),
    ("Utilities", 143.9),
];

pub const MONTHLY_CASHFLOW: &[(&str, f64)] = &[
    ("Apr", 3_420.0),
    ("May", 3_105.0),
    ("Jun", 3_880.0),
    ("Jul", 2_960.0),
    ("Aug", 3_240.0),
    ("Sep", 3_610.0),
];

pub const TRANSACTIONS: &[[&str; 4]] = &[
    ["2026-09-28", "Salary ACME NV", "Income", "3,100.00"],
    ["2026-09-27", "Delhaize", "Groceries", "-64.20"],
    ["2026-09-25", "NMBS", "Transport", "-22.40"],
    ["2026-09-24", "Transfer to MaxiSpaar", "Savings", "-500.00"],
    ["2026-09-22", "Engie", "Utilities", "-143.90"],
    ["2026-09-20", "Cinema Aventure", "Leisure", "-18.50"],
    ["2026-09-18", "Colruyt", "Groceries", "-88.75"],
    ["2026-09-15", "Rent September", "Housing", "-950.00"],
];

pub const ACCOUNTS: &[(&str, &str, f64)] = &[
    ("Current account", "BE68 5390 0754 7034", 4_310.22),
    ("CombiSpaar", "BE71 0961 2345 6769", 8_420.00),
    ("MaxiSpaar", "BE43 0689 9999 9501", 10_250.90),
    ("SolidExtra 3y", "BE12 3456 7890 1234", 1_849.00),
];

pub const SCHEDULED_TRANSFERS: &[[&str; 4]] = &[
    ["2026-10-01", "Landlord BV", "Monthly", "-950.00"],
    ["2026-10-05", "MaxiSpaar", "Monthly", "-500.00"],
    ["2026-10-15", "Insurance Ethias", "Quarterly", "-212.35"],
    ["2026-11-01", "SolidExtra 3y", "Once", "-2,000.00"],
];

pub fn owned_series(series: &[(&str, f64)]) -> Vec<(String, f64)> {
    series
        .iter()
        .map(|(label, value)| (label.to_string(), *value))
        .collect()
}

pub fn owned_rows<const N: usize>(rows: &[[&str; N]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}
