// build a toy aligned corpus of 2000 sentence pairs with two known bad pairs
// run the native stages on it: split, simulated BPE, clean
// ensure the counts, the alignment and the test-set passthrough hold

use std::path::Path;

use shelob::lang::LanguagePair;
use shelob::layout::{SaveDir, Split};
use shelob::processing::clean::{clean_all, PairCleaner};
use shelob::processing::split::split_train;

const PAIRS: usize = 2000;
const LONG_PAIR: usize = 100;
const RATIO_PAIR: usize = 200;

fn english_side() -> Vec<String> {
    (1..=PAIRS)
        .map(|i| match i {
            // 251 tokens, one over the length bound
            LONG_PAIR => format!("number{} {}", i, vec!["tok"; 250].join(" ")),
            // 6 tokens against 2 on the french side
            RATIO_PAIR => "six tokens against two french ones".to_string(),
            _ => format!("sentence number {} end .", i),
        })
        .collect()
}

fn french_side() -> Vec<String> {
    (1..=PAIRS)
        .map(|i| match i {
            LONG_PAIR => format!("numéro{} {}", i, vec!["mot"; 250].join(" ")),
            RATIO_PAIR => "deux mots".to_string(),
            _ => format!("phrase numéro {} fin .", i),
        })
        .collect()
}

fn write_lines(path: &Path, lines: &[String]) {
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content).unwrap();
}

fn line_count(path: &Path) -> usize {
    std::fs::read_to_string(path).unwrap().lines().count()
}

/// Stand-in for the external BPE applier: every processed file gets a
/// `bpe.` sibling with identical content.
fn fake_bpe_apply(save: &SaveDir, pair: &LanguagePair) {
    for split in Split::ALL {
        for lang in pair.langs() {
            std::fs::copy(
                save.processed_file(split, pair, lang),
                save.bpe_file(split, pair, lang),
            )
            .unwrap();
        }
    }
}

#[test]
fn toy_corpus_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let save = SaveDir::new(dir.path());
    save.ensure_layout(false).unwrap();
    let pair = LanguagePair::new("en", "fr");

    write_lines(&save.unsplit_file(&pair, "en"), &english_side());
    write_lines(&save.unsplit_file(&pair, "fr"), &french_side());

    // a small test set, including a pair that would violate the bounds
    let test_en: Vec<String> = (1..=10)
        .map(|i| match i {
            5 => vec!["tok"; 300].join(" "),
            _ => format!("test sentence {} .", i),
        })
        .collect();
    let test_fr: Vec<String> = (1..=10)
        .map(|i| match i {
            5 => vec!["mot"; 300].join(" "),
            _ => format!("phrase de test {} .", i),
        })
        .collect();
    write_lines(&save.processed_file(Split::Test, &pair, "en"), &test_en);
    write_lines(&save.processed_file(Split::Test, &pair, "fr"), &test_fr);

    split_train(&save, &pair).unwrap();

    // the unsplit inputs are consumed by a successful split
    assert!(!save.unsplit_file(&pair, "en").exists());
    assert!(!save.unsplit_file(&pair, "fr").exists());

    // 2000 lines, stride 1333: only line 1333 reaches validation
    for lang in pair.langs() {
        assert_eq!(line_count(&save.processed_file(Split::Train, &pair, lang)), 1999);
        assert_eq!(line_count(&save.processed_file(Split::Val, &pair, lang)), 1);
    }
    assert_eq!(
        std::fs::read_to_string(save.processed_file(Split::Val, &pair, "en")).unwrap(),
        "sentence number 1333 end .\n"
    );
    assert_eq!(
        std::fs::read_to_string(save.processed_file(Split::Val, &pair, "fr")).unwrap(),
        "phrase numéro 1333 fin .\n"
    );

    fake_bpe_apply(&save, &pair);
    clean_all(&PairCleaner::default(), &save, &pair).unwrap();

    // both bad pairs are gone from training, from both sides
    for lang in pair.langs() {
        assert_eq!(line_count(&save.cleaned_file(Split::Train, &pair, lang)), 1997);
        assert_eq!(line_count(&save.cleaned_file(Split::Val, &pair, lang)), 1);
    }
    let train_en = std::fs::read_to_string(save.cleaned_file(Split::Train, &pair, "en")).unwrap();
    let train_fr = std::fs::read_to_string(save.cleaned_file(Split::Train, &pair, "fr")).unwrap();
    assert!(!train_en.contains("number100"));
    assert!(!train_en.contains("six tokens"));
    assert!(!train_fr.contains("numéro100"));
    assert!(!train_fr.contains("deux mots\n"));

    // alignment: dropped pairs shift both sides identically
    for (en, fr) in train_en.lines().zip(train_fr.lines()) {
        let en_id = en.split_whitespace().nth(2).unwrap();
        let fr_id = fr.split_whitespace().nth(2).unwrap();
        assert_eq!(en_id, fr_id);
    }

    // the test pair is copied through untouched, violator included
    for lang in pair.langs() {
        assert_eq!(line_count(&save.cleaned_file(Split::Test, &pair, lang)), 10);
    }
    assert_eq!(
        std::fs::read(save.cleaned_file(Split::Test, &pair, "en")).unwrap(),
        std::fs::read(save.processed_file(Split::Test, &pair, "en")).unwrap()
    );
}

#[test]
fn split_rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let save = SaveDir::new(dir.path());
    save.ensure_layout(false).unwrap();
    let pair = LanguagePair::new("en", "fr");

    write_lines(&save.unsplit_file(&pair, "en"), &english_side());
    write_lines(&save.unsplit_file(&pair, "fr"), &french_side());
    split_train(&save, &pair).unwrap();

    let first_train = std::fs::read(save.processed_file(Split::Train, &pair, "en")).unwrap();
    let first_val = std::fs::read(save.processed_file(Split::Val, &pair, "en")).unwrap();

    write_lines(&save.unsplit_file(&pair, "en"), &english_side());
    write_lines(&save.unsplit_file(&pair, "fr"), &french_side());
    split_train(&save, &pair).unwrap();

    assert_eq!(
        std::fs::read(save.processed_file(Split::Train, &pair, "en")).unwrap(),
        first_train
    );
    assert_eq!(
        std::fs::read(save.processed_file(Split::Val, &pair, "en")).unwrap(),
        first_val
    );
}
