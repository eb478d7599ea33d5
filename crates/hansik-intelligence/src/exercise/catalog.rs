// ABOUTME: Static MET catalog of 34 activities grouped into three intensity tiers
// ABOUTME: MET values follow the Compendium of Physical Activities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use hansik_core::models::{ExerciseOption, Intensity};
use Intensity::{High, Low, Medium};

const fn entry(
    canonical_key: &'static str,
    display_name_en: &'static str,
    display_name_local: &'static str,
    met: f64,
    intensity: Intensity,
    description: &'static str,
    tip: &'static str,
) -> ExerciseOption {
    ExerciseOption {
        canonical_key,
        display_name_en,
        display_name_local,
        met,
        intensity,
        description,
        tip,
    }
}

/// Every activity known to the recommender, in declaration order
#[rustfmt::skip]
pub static EXERCISE_CATALOG: &[ExerciseOption] = &[
    // Low intensity (MET < 4)
    entry("walking_slow", "Walking (slow)", "천천히 걷기", 3.0, Low, "시속 4km 이하로 느긋하게 걷기", "자연스럽게 팔을 흔들며 걸으세요"),
    entry("walking_moderate", "Walking (moderate)", "보통 걷기", 3.5, Low, "시속 4-5km로 걷기", "대화할 수 있는 속도로 걸으세요"),
    entry("stretching", "Stretching", "스트레칭", 2.5, Low, "전신 스트레칭 및 유연성 운동", "각 동작을 15-30초씩 유지하세요"),
    entry("yoga_hatha", "Hatha yoga", "하타 요가", 3.0, Low, "기본적인 요가 자세와 호흡", "호흡에 집중하며 천천히 하세요"),
    entry("light_housework", "Light housework", "가벼운 집안일", 2.5, Low, "설거지, 빨래 개기 등", "일상 활동도 운동이 됩니다"),
    entry("tai_chi", "Tai chi", "태극권", 3.0, Low, "느린 동작의 태극권", "균형과 호흡에 집중하세요"),
    entry("pilates_beginner", "Pilates (beginner)", "초급 필라테스", 3.0, Low, "기본 필라테스 동작", "코어 근육을 의식하며 하세요"),
    // Medium intensity (MET 4-7)
    entry("walking_brisk", "Walking (brisk)", "빠르게 걷기", 4.5, Medium, "시속 5.5-6.5km로 빠르게 걷기", "약간 숨이 찰 정도로 걸으세요"),
    entry("cycling_leisure", "Cycling (leisure)", "여가 자전거", 5.5, Medium, "시속 15-20km로 자전거 타기", "안전 장비를 착용하세요"),
    entry("swimming_leisure", "Swimming (leisure)", "여가 수영", 6.0, Medium, "천천히 수영하기", "정기적인 휴식을 취하세요"),
    entry("dancing_aerobic", "Aerobic dance", "에어로빅", 6.5, Medium, "중간 강도의 에어로빅", "음악에 맞춰 즐겁게 하세요"),
    entry("table_tennis", "Table tennis", "탁구", 5.0, Medium, "탁구 경기", "워밍업 후 시작하세요"),
    entry("badminton", "Badminton", "배드민턴", 5.5, Medium, "배드민턴 경기", "파트너와 함께 즐기세요"),
    entry("golf_walking", "Golf (walking)", "골프 (걷기)", 4.5, Medium, "카트 없이 걸어서 골프", "스윙 전 스트레칭하세요"),
    entry("yoga_power", "Power yoga", "파워 요가", 5.5, Medium, "강도 높은 요가", "자신의 수준에 맞게 하세요"),
    entry("elliptical", "Elliptical trainer", "일립티컬", 5.0, Medium, "일립티컬 머신 운동", "팔과 다리를 함께 사용하세요"),
    entry("hiking", "Hiking (gentle)", "가벼운 등산", 6.0, Medium, "완만한 경사 등산", "등산화와 충분한 물을 준비하세요"),
    // High intensity (vigorous)
    entry("running_slow", "Running (jog)", "조깅", 8.0, High, "시속 8km로 조깅", "워밍업 후 시작하세요"),
    entry("running_moderate", "Running (moderate)", "달리기", 10.0, High, "시속 10km로 달리기", "무리하지 말고 페이스 조절하세요"),
    entry("running_fast", "Running (fast)", "빠른 달리기", 12.0, High, "시속 12km 이상으로 달리기", "충분한 휴식이 필요합니다"),
    entry("cycling_vigorous", "Cycling (vigorous)", "고강도 자전거", 10.0, High, "시속 25km 이상으로 자전거", "헬멧을 꼭 착용하세요"),
    entry("swimming_laps", "Swimming (laps)", "수영 랩", 8.0, High, "빠른 속도로 수영", "충분한 워밍업이 필요합니다"),
    entry("jump_rope", "Jump rope", "줄넘기", 11.0, High, "보통 속도로 줄넘기", "착지 충격에 주의하세요"),
    entry("basketball", "Basketball", "농구", 8.0, High, "농구 경기", "발목 부상에 주의하세요"),
    entry("soccer", "Soccer", "축구", 9.0, High, "축구 경기", "스트레칭 후 시작하세요"),
    entry("tennis", "Tennis", "테니스", 8.0, High, "테니스 경기", "라켓 그립을 확인하세요"),
    entry("weight_training", "Weight training", "웨이트 트레이닝", 6.0, High, "중량 운동", "올바른 자세가 중요합니다"),
    entry("crossfit", "CrossFit", "크로스핏", 12.0, High, "고강도 인터벌 트레이닝", "체력에 맞게 조절하세요"),
    entry("hiit", "HIIT", "고강도 인터벌", 10.0, High, "고강도 인터벌 트레이닝", "회복 시간을 충분히 가지세요"),
    entry("boxing", "Boxing", "복싱", 9.5, High, "복싱 훈련", "손목 보호대를 착용하세요"),
    entry("kickboxing", "Kickboxing", "킥복싱", 10.0, High, "킥복싱 훈련", "기본기를 먼저 익히세요"),
    entry("spinning", "Spinning", "스피닝", 9.0, High, "실내 자전거 스피닝", "충분한 수분을 섭취하세요"),
    entry("rowing", "Rowing machine", "로잉머신", 8.5, High, "로잉머신 운동", "허리를 곧게 펴세요"),
    entry("stair_climbing", "Stair climbing", "계단 오르기", 9.0, High, "계단 빠르게 오르기", "무릎 부상에 주의하세요"),
    entry("mountain_hiking", "Hiking (steep)", "고강도 등산", 8.0, High, "가파른 산 등반", "등산 스틱을 사용하세요"),
];

/// Look up an activity by canonical key
#[must_use]
pub fn find(canonical_key: &str) -> Option<&'static ExerciseOption> {
    EXERCISE_CATALOG
        .iter()
        .find(|option| option.canonical_key == canonical_key)
}

/// All activities of one tier, in declaration order
pub fn by_intensity(intensity: Intensity) -> impl Iterator<Item = &'static ExerciseOption> {
    EXERCISE_CATALOG
        .iter()
        .filter(move |option| option.intensity == intensity)
}
