//! End-to-end scenarios over the public `UnitTokenizer` API, matching the
//! literal examples each codec is specified against.

use unit_tokenizer::bpe::FastBpeTokenizer;
use unit_tokenizer::{PackBitsTokenizer, RleTokenizer, UnitTokenizer};

fn growing_runs() -> Vec<Vec<u32>> {
    vec![vec![0, 1, 0, 1, 2, 0, 1, 2, 3, 0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 5]]
}

#[test]
fn scenario_1_bpe_fit_learns_expected_rules() {
    let tokenizer = FastBpeTokenizer::fit(&growing_runs(), 10).unwrap();
    let learned: Vec<((u32, u32), u32)> = tokenizer.rules().iter().map(|r| (r.pair, r.token)).collect();
    assert_eq!(learned, vec![((0, 1), 6), ((6, 2), 7), ((7, 3), 8), ((8, 4), 9)]);
}

#[test]
fn scenario_2_bpe_encode() {
    let tokenizer = FastBpeTokenizer::fit(&growing_runs(), 10).unwrap();
    let encoded = tokenizer.encode(&[vec![0, 1, 0, 1, 2, 3, 4, 5]]).unwrap();
    assert_eq!(encoded, vec![vec![6, 9, 5]]);
}

#[test]
fn scenario_3_bpe_decode() {
    let tokenizer = FastBpeTokenizer::fit(&growing_runs(), 10).unwrap();
    let decoded = tokenizer.decode(&[vec![6, 9, 5]]).unwrap();
    assert_eq!(decoded, vec![vec![0, 1, 0, 1, 2, 3, 4, 5]]);
}

#[test]
fn scenario_4_bpe_save_load_roundtrip() {
    let dir = tempdir::TempDir::new("unit-tokenizer-scenarios").unwrap();
    let path = dir.path().join("vocab.json");

    let tokenizer = FastBpeTokenizer::fit(&growing_runs(), 10).unwrap();
    tokenizer.save(&path).unwrap();

    let loaded = FastBpeTokenizer::load(&path).unwrap();
    let encoded = loaded.encode(&[vec![0, 1, 0, 1, 2, 3, 4, 5]]).unwrap();
    assert_eq!(encoded, vec![vec![6, 9, 5]]);
}

#[test]
fn scenario_5_bpe_batch_fit_and_encode() {
    let batch = vec![
        vec![0, 1, 0, 1, 2, 0, 1, 2, 3],
        vec![0, 1, 2, 3, 4, 0, 1, 2, 3, 4, 5],
    ];
    let tokenizer = FastBpeTokenizer::fit(&batch, 10).unwrap();
    let encoded = tokenizer
        .encode(&[vec![0, 1, 0, 1, 2, 3, 4, 5], vec![0, 1, 2, 0, 1, 2, 3]])
        .unwrap();
    assert_eq!(encoded, vec![vec![6, 9, 5], vec![7, 8]]);
}

#[test]
fn scenario_6_rle_encode() {
    let codec = RleTokenizer::default();
    let encoded = codec.encode(&[vec![0, 1, 2, 2, 3, 3, 3]]).unwrap();
    assert_eq!(encoded, vec![vec![1, 100, 1, 101, 2, 102, 3, 103]]);
}

#[test]
fn scenario_7_packbits_encode() {
    let codec = PackBitsTokenizer::default();
    let encoded = codec
        .encode(&[vec![0, 0, 0, 0, 1, 1, 2, 2, 2, 2, 2, 2, 3, 4, 5, 6]])
        .unwrap();
    assert_eq!(encoded, vec![vec![4, 100, 2, 101, 6, 102, 0, 4, 103, 104, 105, 106]]);
}
