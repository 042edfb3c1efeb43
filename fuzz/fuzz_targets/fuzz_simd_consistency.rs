#![no_main]

use libfuzzer_sys::fuzz_target;
use wordrun::CountingBackend;
use wordrun::wc_default::count_words_scalar;

fuzz_target!(|data: &[u8]| {
    // Every SIMD backend the CPU supports must match the scalar scan
    let scalar = count_words_scalar(data);

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        if is_x86_feature_detected!("sse2") {
            let backend = unsafe { CountingBackend::new_unchecked("sse2") }.unwrap();
            assert_eq!(scalar, backend.count_words(data), "SSE2 mismatch");
        }

        if is_x86_feature_detected!("avx2") {
            let backend = unsafe { CountingBackend::new_unchecked("avx2") }.unwrap();
            assert_eq!(scalar, backend.count_words(data), "AVX2 mismatch");
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            let backend = unsafe { CountingBackend::new_unchecked("neon") }.unwrap();
            assert_eq!(scalar, backend.count_words(data), "NEON mismatch");
        }
    }

    assert_eq!(scalar, CountingBackend::detect().count_words(data), "detected backend mismatch");
});
