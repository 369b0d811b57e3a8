#![no_main]

use enrollnet_core::config::EigenvectorConfig;
use enrollnet_core::model::ExcludedCourses;
use enrollnet_core::store::RegistryData;
use enrollnet_network::full_centrality;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = serde_json::from_slice::<RegistryData>(data) else {
        return;
    };

    let result = full_centrality(
        &doc.students,
        &ExcludedCourses::default(),
        &EigenvectorConfig::default(),
    );
    assert_eq!(result.overview.total_students, doc.students.len());
});
