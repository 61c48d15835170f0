fn main() {
    // Only target builds need the ESP-IDF environment; host test builds
    // compile without the `espidf` feature.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
