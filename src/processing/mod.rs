/*! Corpus processing stages

Contains the per-stage building blocks of the preparation pipeline:
tokenization, test-set extraction, train/validation splitting, BPE
learning and application, pair cleaning and the final binarizer
hand-off.

Stages communicate through files only, named by [crate::layout].
!*/
pub mod binarize;
pub mod bpe;
pub mod clean;
pub mod sgml;
pub mod split;
pub mod tokenize;
