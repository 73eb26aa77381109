pub const API_VERSION: &str = "1.0";

pub mod schedule {

    /// Bookable appointment times. 13:00 is lunch.
    pub const SLOT_UNIVERSE: &[&str] = &[
        "09:00", "10:00", "11:00", "12:00", "14:00", "15:00", "16:00", "17:00",
    ];

    /// Slot list advertised by the availability calendar.
    pub const CALENDAR_SLOTS: &[&str] = &["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"];

    pub const AVAILABILITY_WINDOW_DAYS: i64 = 14;
}

pub mod delivery {

    pub const EXPECTED_DELIVERY_DAYS: i64 = 5;
}

pub mod orders {

    pub const DEFAULT_PAYMENT_METHOD: &str = "Cash on Delivery";

    pub const UNKNOWN_PRODUCT: &str = "Unknown Product";
}

pub mod session {

    pub const IDENTITY_KEY: &str = "identity";

    pub const PAGE_FLASHES_KEY: &str = "page_flashes";
}
