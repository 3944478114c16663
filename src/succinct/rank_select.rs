//! Rank/select index with 256-bit blocks
//!
//! One u32 per 256-bit block storing cumulative rank1; select runs a binary
//! search over the rank cache and a word scan inside the block. Lowest
//! memory overhead of the classic variants (4 bytes per 256 bits), fast
//! enough for trie navigation where every query does a handful of ranks.

use crate::error::{Result, TrieError};
use crate::succinct::BitsView;

const LINE_BITS: usize = 256;
const WORDS_PER_LINE: usize = LINE_BITS / 64;

/// Rank/select over a frozen bit view
///
/// `rank1(pos)` counts set bits in `[0, pos)`; `select1(k)` returns the
/// position of the zero-indexed k-th set bit.
#[derive(Debug, Clone)]
pub struct RankSelectIndex {
    bits: BitsView,
    rank_cache: Vec<u32>,
    max_rank0: usize,
    max_rank1: usize,
}

impl RankSelectIndex {
    /// Build the rank cache for a bit view
    pub fn new(bits: BitsView) -> Result<Self> {
        let size = bits.len();
        if size > u32::MAX as usize {
            return Err(TrieError::format(format!(
                "bit sequence of {} bits exceeds the supported size",
                size
            )));
        }
        let nlines = (size + LINE_BITS - 1) / LINE_BITS;

        let mut rank_cache = Vec::with_capacity(nlines + 1);
        let mut cumulative = 0u64;
        for line in 0..nlines {
            rank_cache.push(cumulative as u32);
            for j in 0..WORDS_PER_LINE {
                let word_idx = line * WORDS_PER_LINE + j;
                if word_idx < bits.num_words() {
                    cumulative += bits.word(word_idx).count_ones() as u64;
                }
            }
        }
        rank_cache.push(cumulative as u32); // sentinel

        // Padding past `len` is zero in a valid image, so the sentinel holds
        // the true rank1 over [0, len).
        let max_rank1 = cumulative as usize;
        let max_rank0 = size - max_rank1;

        Ok(Self {
            bits,
            rank_cache,
            max_rank0,
            max_rank1,
        })
    }

    /// Number of bits
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True if the sequence is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Total number of set bits
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.max_rank1
    }

    /// Total number of clear bits
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.max_rank0
    }

    /// Bit at `pos`
    #[inline]
    pub fn get(&self, pos: usize) -> Option<bool> {
        self.bits.get(pos)
    }

    /// Memory used by the acceleration cache, in bytes
    pub fn cache_size(&self) -> usize {
        self.rank_cache.len() * 4
    }

    #[inline(always)]
    fn popcount_trail(word: u64, bit_count: usize) -> usize {
        if bit_count == 0 {
            return 0;
        }
        (word & ((1u64 << bit_count) - 1)).count_ones() as usize
    }

    #[inline(always)]
    fn select_in_word(mut word: u64, k: usize) -> usize {
        for _ in 0..k {
            word &= word - 1;
        }
        word.trailing_zeros() as usize
    }

    /// Number of set bits in `[0, pos)`
    #[inline]
    pub fn rank1(&self, pos: usize) -> usize {
        debug_assert!(pos <= self.len());
        if pos == 0 {
            return 0;
        }
        let line = pos / LINE_BITS;
        let mut rank = self.rank_cache[line] as usize;

        let line_word_start = line * WORDS_PER_LINE;
        let target_word = pos / 64;
        for i in line_word_start..target_word {
            if i < self.bits.num_words() {
                rank += self.bits.word(i).count_ones() as usize;
            }
        }
        let bit_in_word = pos % 64;
        if bit_in_word > 0 && target_word < self.bits.num_words() {
            rank += Self::popcount_trail(self.bits.word(target_word), bit_in_word);
        }
        rank
    }

    /// Number of clear bits in `[0, pos)`
    #[inline]
    pub fn rank0(&self, pos: usize) -> usize {
        pos - self.rank1(pos)
    }

    /// Position of the zero-indexed k-th set bit
    pub fn select1(&self, k: usize) -> Result<usize> {
        if k >= self.max_rank1 {
            return Err(TrieError::format("select1 out of range"));
        }
        let nlines = self.rank_cache.len() - 1;
        let mut lo = 0usize;
        let mut hi = nlines;
        while lo < hi {
            let mid = (lo + hi) / 2;
            if (self.rank_cache[mid] as usize) <= k {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        // lo is the first line where rank_cache[lo] > k
        let line = lo - 1;
        let mut remaining = k - self.rank_cache[line] as usize;
        let base = line * LINE_BITS;

        for j in 0..WORDS_PER_LINE {
            let word_idx = line * WORDS_PER_LINE + j;
            if word_idx >= self.bits.num_words() {
                break;
            }
            let word = self.bits.word(word_idx);
            let ones = word.count_ones() as usize;
            if remaining < ones {
                return Ok(base + j * 64 + Self::select_in_word(word, remaining));
            }
            remaining -= ones;
        }
        Err(TrieError::format("select1 inconsistent rank cache"))
    }

    /// Position of the zero-indexed k-th clear bit
    pub fn select0(&self, k: usize) -> Result<usize> {
        if k >= self.max_rank0 {
            return Err(TrieError::format("select0 out of range"));
        }
        let nlines = self.rank_cache.len() - 1;
        let mut lo = 0usize;
        let mut hi = nlines;
        while lo < hi {
            let mid = (lo + hi) / 2;
            let rank0_at_mid = mid * LINE_BITS - self.rank_cache[mid] as usize;
            if rank0_at_mid <= k {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        let line = lo - 1;
        let rank0_at_line = line * LINE_BITS - self.rank_cache[line] as usize;
        let mut remaining = k - rank0_at_line;
        let base = line * LINE_BITS;

        for j in 0..WORDS_PER_LINE {
            let word_idx = line * WORDS_PER_LINE + j;
            if word_idx >= self.bits.num_words() {
                break;
            }
            let word = self.bits.word(word_idx);
            // Clamp the zero count for the partial last word
            let max_bits = if base + (j + 1) * 64 > self.len() {
                self.len() - (base + j * 64)
            } else {
                64
            };
            let zeros_in_range = if max_bits < 64 {
                ((!word) & ((1u64 << max_bits) - 1)).count_ones() as usize
            } else {
                (!word).count_ones() as usize
            };

            if remaining < zeros_in_range {
                return Ok(base + j * 64 + Self::select_in_word(!word, remaining));
            }
            remaining -= zeros_in_range;
        }
        Err(TrieError::format("select0 inconsistent rank cache"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{ByteRegion, WordsView};
    use crate::succinct::BitVector;

    fn index_from_bits(bits: &[bool]) -> RankSelectIndex {
        let mut bv = BitVector::new();
        for &b in bits {
            bv.push(b);
        }
        let mut bytes = Vec::new();
        for w in bv.words() {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        let view = BitsView::new(
            WordsView::new(ByteRegion::from_vec(bytes)).unwrap(),
            bits.len(),
        );
        RankSelectIndex::new(view).unwrap()
    }

    fn naive_rank1(bits: &[bool], pos: usize) -> usize {
        bits[..pos].iter().filter(|&&b| b).count()
    }

    #[test]
    fn test_rank_against_naive() {
        let bits: Vec<bool> = (0..1000).map(|i| (i * 7 + 3) % 5 == 0).collect();
        let rs = index_from_bits(&bits);
        for pos in 0..=bits.len() {
            assert_eq!(rs.rank1(pos), naive_rank1(&bits, pos), "rank1({})", pos);
            assert_eq!(rs.rank0(pos), pos - naive_rank1(&bits, pos));
        }
    }

    #[test]
    fn test_select1_inverts_rank1() {
        let bits: Vec<bool> = (0..700).map(|i| i % 3 == 1).collect();
        let rs = index_from_bits(&bits);
        for k in 0..rs.count_ones() {
            let pos = rs.select1(k).unwrap();
            assert_eq!(rs.get(pos), Some(true));
            assert_eq!(rs.rank1(pos), k);
        }
        assert!(rs.select1(rs.count_ones()).is_err());
    }

    #[test]
    fn test_select0_inverts_rank0() {
        let bits: Vec<bool> = (0..700).map(|i| i % 4 != 0).collect();
        let rs = index_from_bits(&bits);
        for k in 0..rs.count_zeros() {
            let pos = rs.select0(k).unwrap();
            assert_eq!(rs.get(pos), Some(false));
            assert_eq!(rs.rank0(pos), k);
        }
        assert!(rs.select0(rs.count_zeros()).is_err());
    }

    #[test]
    fn test_empty_sequence() {
        let rs = index_from_bits(&[]);
        assert_eq!(rs.len(), 0);
        assert_eq!(rs.count_ones(), 0);
        assert_eq!(rs.rank1(0), 0);
        assert!(rs.select1(0).is_err());
        assert!(rs.select0(0).is_err());
    }

    #[test]
    fn test_all_ones_all_zeros() {
        let ones = index_from_bits(&vec![true; 300]);
        assert_eq!(ones.count_ones(), 300);
        assert_eq!(ones.select1(299).unwrap(), 299);
        assert!(ones.select0(0).is_err());

        let zeros = index_from_bits(&vec![false; 300]);
        assert_eq!(zeros.count_zeros(), 300);
        assert_eq!(zeros.select0(299).unwrap(), 299);
        assert!(zeros.select1(0).is_err());
    }

    #[test]
    fn test_partial_tail_word_select0() {
        // 65 bits: ones everywhere except the final position
        let mut bits = vec![true; 65];
        bits[64] = false;
        let rs = index_from_bits(&bits);
        assert_eq!(rs.count_zeros(), 1);
        assert_eq!(rs.select0(0).unwrap(), 64);
    }
}
