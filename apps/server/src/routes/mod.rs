macros_utils::routes! {
    load health,
    load check_status,
    load passes,
    load projects,
}
