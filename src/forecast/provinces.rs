/// Province display names and the code the upstream feed uses in its file names.
pub const PROVINCES: &[(&str, &str)] = &[
    ("Aceh", "Aceh"),
    ("Bali", "Bali"),
    ("Banten", "Banten"),
    ("Bengkulu", "Bengkulu"),
    ("DI Yogyakarta", "DIYogyakarta"),
    ("DKI Jakarta", "DKIJakarta"),
    ("Gorontalo", "Gorontalo"),
    ("Jambi", "Jambi"),
    ("Jawa Barat", "JawaBarat"),
    ("Jawa Tengah", "JawaTengah"),
    ("Jawa Timur", "JawaTimur"),
    ("Kalimantan Barat", "KalimantanBarat"),
    ("Kalimantan Selatan", "KalimantanSelatan"),
    ("Kalimantan Tengah", "KalimantanTengah"),
    ("Kalimantan Timur", "KalimantanTimur"),
    ("Kalimantan Utara", "KalimantanUtara"),
    ("Bangka Belitung", "BangkaBelitung"),
    ("Kepulauan Riau", "KepulauanRiau"),
    ("Lampung", "Lampung"),
    ("Maluku", "Maluku"),
    ("Maluku Utara", "MalukuUtara"),
    ("Nusa Tenggara Barat", "NusaTenggaraBarat"),
    ("Nusa Tenggara Timur", "NusaTenggaraTimur"),
    ("Papua", "Papua"),
    ("Papua Barat", "PapuaBarat"),
    ("Riau", "Riau"),
    ("Sulawesi Barat", "SulawesiBarat"),
    ("Sulawesi Selatan", "SulawesiSelatan"),
    ("Sulawesi Tengah", "SulawesiTengah"),
    ("Sulawesi Tenggara", "SulawesiTenggara"),
    ("Sulawesi Utara", "SulawesiUtara"),
    ("Sumatera Barat", "SumateraBarat"),
    ("Sumatera Selatan", "SumateraSelatan"),
    ("Sumatera Utara", "SumateraUtara"),
];

pub fn province_codes() -> impl Iterator<Item = &'static str> {
    PROVINCES.iter().map(|(_, code)| *code)
}
