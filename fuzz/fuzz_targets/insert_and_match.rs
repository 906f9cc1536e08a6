#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, i32)>, String)| {
    let mut router = pathrouter::Router::new();

    for (route, value) in data.0 {
        if router.insert(route, value).is_ok() {
            router.check_invariants().unwrap();
        }
    }

    let mut params = pathrouter::Params::new();
    let _ = router.lookup(&data.1, &mut params);
});
