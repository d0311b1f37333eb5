fn main() {
    // ESP-IDF builds need the toolchain environment exported to rustc;
    // host builds have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
