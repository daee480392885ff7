//! # emx
//!
//! An Emmet-style abbreviation expander for HTML and XML.
//!
//! A terse expression combining tag names, ids, classes, attributes,
//! repetition counts, sibling/child directives and numbering rules is
//! expanded deterministically into markup, including multi-line indented
//! output and optional cursor tab-stop placeholders for editor integration:
//!
//! ```text
//! ul.list>li.item$*3   =>   <ul class="list">
//!                               <li class="item1"></li>
//!                               <li class="item2"></li>
//!                               <li class="item3"></li>
//!                           </ul>
//! ```
//!
//! The primary entry point is [`emx::expand`].

pub mod emx;
