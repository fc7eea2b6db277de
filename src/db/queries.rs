pub const INSERT_WATER_TEST: &str = r#"
INSERT INTO water_tests (
    id, waterbody_name, waterbody_id, date_time, location, latitude, longitude,
    photo_url, notes, quality, asha_id
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
RETURNING id, waterbody_name, waterbody_id, date_time, location, latitude, longitude,
          photo_url, notes, quality, asha_id, created_at;
"#;

pub const SELECT_WATER_TEST: &str = r#"
SELECT id, waterbody_name, waterbody_id, date_time, location, latitude, longitude,
       photo_url, notes, quality, asha_id, created_at
FROM water_tests WHERE id = $1;
"#;

pub const UPDATE_WATER_TEST: &str = r#"
UPDATE water_tests
SET waterbody_name = $2,
    waterbody_id = $3,
    date_time = $4,
    location = $5,
    latitude = $6,
    longitude = $7,
    photo_url = $8,
    notes = $9,
    quality = $10
WHERE id = $1
RETURNING id, waterbody_name, waterbody_id, date_time, location, latitude, longitude,
          photo_url, notes, quality, asha_id, created_at;
"#;

pub const DELETE_WATER_TEST: &str = r#"
DELETE FROM water_tests WHERE id = $1;
"#;

pub const SELECT_ALL_WATER_TESTS: &str = r#"
SELECT id, waterbody_name, waterbody_id, date_time, location, latitude, longitude,
       photo_url, notes, quality, asha_id, created_at
FROM water_tests ORDER BY created_at DESC;
"#;

pub const SELECT_WATER_TESTS_BY_ASHA: &str = r#"
SELECT id, waterbody_name, waterbody_id, date_time, location, latitude, longitude,
       photo_url, notes, quality, asha_id, created_at
FROM water_tests WHERE asha_id = $1 ORDER BY created_at DESC;
"#;

pub const SELECT_LEADER_CONTACTS: &str = r#"
SELECT id, number FROM users WHERE role = 'leader';
"#;

pub const SELECT_ALL_USER_NUMBERS: &str = r#"
SELECT number FROM users;
"#;

// Bulk insert from parallel arrays: one row per leader.
pub const INSERT_LEADER_ALERTS: &str = r#"
INSERT INTO leader_alerts (id, leader_id, message, water_test_id)
SELECT * FROM UNNEST($1::uuid[], $2::uuid[], $3::text[], $4::uuid[])
RETURNING id, leader_id, message, water_test_id, created_at;
"#;

pub const INSERT_GLOBAL_ALERT: &str = r#"
INSERT INTO global_alerts (id, message, water_test_id)
VALUES ($1, $2, $3)
RETURNING id, message, water_test_id, created_at;
"#;

// $1 key, $2 name, $3 waterbody_id, $4 location, $5 lat, $6 lng, $7 updated_by.
// Counts are recomputed from every test recorded for the same waterbody.
pub const UPSERT_HEALTH_CARD: &str = r#"
WITH tests AS (
    SELECT quality, date_time
    FROM water_tests
    WHERE ($3::text IS NOT NULL AND waterbody_id = $3)
       OR ($3::text IS NULL AND waterbody_id IS NULL AND lower(waterbody_name) = lower($2))
),
latest AS (
    SELECT quality FROM tests ORDER BY date_time DESC LIMIT 1
)
INSERT INTO waterbody_health_cards (
    waterbody_key, waterbody_name, waterbody_id, location, latitude, longitude,
    total_tests, good_tests, medium_tests, high_tests,
    latest_quality, last_tested_at, status, updated_by, updated_at
)
SELECT $1, $2, $3, $4, $5, $6,
       COUNT(*),
       COUNT(*) FILTER (WHERE quality = 'good'),
       COUNT(*) FILTER (WHERE quality = 'medium'),
       COUNT(*) FILTER (WHERE quality = 'high'),
       (SELECT quality FROM latest),
       MAX(date_time),
       CASE (SELECT quality FROM latest)
           WHEN 'high' THEN 'unsafe'
           WHEN 'medium' THEN 'caution'
           ELSE 'safe'
       END,
       $7, NOW()
FROM tests
ON CONFLICT (waterbody_key) DO UPDATE
SET waterbody_name = EXCLUDED.waterbody_name,
    location = EXCLUDED.location,
    latitude = COALESCE(EXCLUDED.latitude, waterbody_health_cards.latitude),
    longitude = COALESCE(EXCLUDED.longitude, waterbody_health_cards.longitude),
    total_tests = EXCLUDED.total_tests,
    good_tests = EXCLUDED.good_tests,
    medium_tests = EXCLUDED.medium_tests,
    high_tests = EXCLUDED.high_tests,
    latest_quality = EXCLUDED.latest_quality,
    last_tested_at = EXCLUDED.last_tested_at,
    status = EXCLUDED.status,
    updated_by = EXCLUDED.updated_by,
    updated_at = NOW();
"#;
