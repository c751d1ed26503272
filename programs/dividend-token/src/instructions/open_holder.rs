use anchor_lang::prelude::*;
use crate::constants::HOLDER_SEED;
use crate::errors::ErrorCode;
use crate::states::HolderAccount;

/// Creates the holder record of `owner`. Anyone may pay for it, so a
/// sender can open the recipient's record before transferring. Calling it
/// for an existing record is a no-op.
#[derive(Accounts)]
#[instruction(owner: Pubkey)]
pub struct OpenHolder<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Holder record PDA
    #[account(
        init_if_needed,
        payer = payer,
        space = HolderAccount::DISCRIMINATOR.len() + HolderAccount::INIT_SPACE,
        seeds = [HOLDER_SEED, owner.as_ref()],
        bump
    )]
    pub holder_account: Box<Account<'info, HolderAccount>>,

    pub system_program: Program<'info, System>,
}

impl<'info> OpenHolder<'info> {
    pub fn handle(ctx: Context<OpenHolder>, owner: Pubkey) -> Result<()> {
        require!(owner != Pubkey::default(), ErrorCode::InvalidAccount);

        let holder_account = &mut ctx.accounts.holder_account;
        if holder_account.owner == owner {
            msg!("Holder record for {} already open", owner);
            return Ok(());
        }

        holder_account.set_inner(HolderAccount::new(owner, ctx.bumps.holder_account));
        msg!("Opened holder record {} for {}", holder_account.key(), owner);

        emit!(crate::events::HolderOpened {
            owner,
            holder_account: holder_account.key(),
            payer: ctx.accounts.payer.key(),
            timestamp: Clock::get()?.unix_timestamp,
        });

        Ok(())
    }
}
